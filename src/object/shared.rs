//! Preallocated exemplar values
//!
//! Zero-length vectors of every atomic kind and the boolean singletons are
//! allocated once and handed out by reference-counted clone. Storage is
//! immutable, so sharing them can never leak a mutation between callers.

use lazy_static::lazy_static;

use super::vector::*;
use super::{List, Value};

lazy_static! {
    static ref EMPTY_LGL: Rep<Logical> = Rep::new();
    static ref EMPTY_INT: Rep<Integer> = Rep::new();
    static ref EMPTY_DBL: Rep<Double> = Rep::new();
    static ref EMPTY_CPL: Rep<Complex> = Rep::new();
    static ref EMPTY_CHR: Rep<Character> = Rep::new();
    static ref EMPTY_RAW: Rep<Raw> = Rep::new();
    static ref EMPTY_LIST: List = Rep::new();
    static ref TRUE: Rep<Logical> = Rep::from(vec![Logical::Some(true)]);
    static ref FALSE: Rep<Logical> = Rep::from(vec![Logical::Some(false)]);
}

pub fn empty_lgl() -> Value {
    Value::Vector(Vector::Logical(EMPTY_LGL.clone()))
}

pub fn empty_int() -> Value {
    Value::Vector(Vector::Integer(EMPTY_INT.clone()))
}

pub fn empty_dbl() -> Value {
    Value::Vector(Vector::Double(EMPTY_DBL.clone()))
}

pub fn empty_cpl() -> Value {
    Value::Vector(Vector::Complex(EMPTY_CPL.clone()))
}

pub fn empty_chr() -> Value {
    Value::Vector(Vector::Character(EMPTY_CHR.clone()))
}

pub fn empty_raw() -> Value {
    Value::Vector(Vector::Raw(EMPTY_RAW.clone()))
}

pub fn empty_list() -> Value {
    Value::List(EMPTY_LIST.clone())
}

pub fn scalar_bool(x: bool) -> Value {
    let rep = if x { TRUE.clone() } else { FALSE.clone() };
    Value::Vector(Vector::Logical(rep))
}
