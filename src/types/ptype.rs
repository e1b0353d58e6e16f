use std::fmt::Display;

use crate::error::{Error, Result};
use crate::object::shared;
use crate::object::*;

use super::KindTag;

/// Zero-size representative of a type
///
/// Prototypes carry type identity and structure only. Two prototypes are the
/// same type exactly when they are structurally equal, so `PartialEq` is type
/// equality.
///
#[derive(Debug, Clone, PartialEq)]
pub enum Prototype {
    /// No type information; the identity of common-type resolution
    Unspecified,
    Null,
    Logical,
    Integer,
    Double,
    Complex,
    Character,
    Raw,
    List,
    Record(RecordType),
    Extended(ExtendedType),
    Scalar(ClassId),
}

/// Fields of a record type, in resolution order
///
/// Type equality compares fields by name, so two record types listing the
/// same fields in a different order are the same type.
///
#[derive(Debug, Clone, Default)]
pub struct RecordType {
    pub fields: Vec<(String, Prototype)>,
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .all(|(n, p)| other.get(n).is_some_and(|q| p == q))
    }
}

impl RecordType {
    pub fn new(fields: Vec<(String, Prototype)>) -> Self {
        RecordType { fields }
    }

    pub fn get(&self, name: &str) -> Option<&Prototype> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedType {
    pub class: ClassId,
    /// Type of the underlying storage
    pub data: Box<Prototype>,
    pub attrs: Attrs,
}

impl Prototype {
    /// The kind used to dispatch on this prototype
    ///
    /// An unspecified prototype reports `Logical`, the kind it finalizes to.
    ///
    pub fn kind(&self) -> KindTag {
        match self {
            Prototype::Unspecified | Prototype::Logical => KindTag::Logical,
            Prototype::Null => KindTag::Null,
            Prototype::Integer => KindTag::Integer,
            Prototype::Double => KindTag::Double,
            Prototype::Complex => KindTag::Complex,
            Prototype::Character => KindTag::Character,
            Prototype::Raw => KindTag::Raw,
            Prototype::List => KindTag::List,
            Prototype::Record(_) => KindTag::Record,
            Prototype::Extended(_) => KindTag::Extended,
            Prototype::Scalar(_) => KindTag::Scalar,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Prototype::Unspecified)
    }

    pub fn record(fields: Vec<(&str, Prototype)>) -> Self {
        Prototype::Record(RecordType::new(
            fields.into_iter().map(|(n, p)| (n.to_string(), p)).collect(),
        ))
    }

    /// Resolve every remaining unspecified type, including nested fields
    ///
    /// Unspecified finalizes to logical. This is applied once, after a common
    /// type has been resolved over all inputs.
    ///
    pub fn finalize(self) -> Prototype {
        match self {
            Prototype::Unspecified => Prototype::Logical,
            Prototype::Record(r) => Prototype::Record(RecordType::new(
                r.fields.into_iter().map(|(n, p)| (n, p.finalize())).collect(),
            )),
            Prototype::Extended(x) => Prototype::Extended(ExtendedType {
                data: Box::new(x.data.finalize()),
                ..x
            }),
            p => p,
        }
    }

    /// The zero-size value of this type
    pub fn empty(&self) -> Result<Value> {
        Ok(match self {
            Prototype::Unspecified | Prototype::Logical => shared::empty_lgl(),
            Prototype::Integer => shared::empty_int(),
            Prototype::Double => shared::empty_dbl(),
            Prototype::Complex => shared::empty_cpl(),
            Prototype::Character => shared::empty_chr(),
            Prototype::Raw => shared::empty_raw(),
            Prototype::List => shared::empty_list(),
            _ => return self.init(0),
        })
    }

    /// A value of `n` missing observations of this type
    ///
    /// Raw vectors have no missing marker and are filled with zero bytes.
    ///
    pub fn init(&self, n: usize) -> Result<Value> {
        Ok(match self {
            Prototype::Null => Value::Null,
            Prototype::Unspecified | Prototype::Logical => {
                Value::from(vec![Logical::NA; n])
            }
            Prototype::Integer => Value::from(vec![Integer::NA; n]),
            Prototype::Double => Value::from(vec![Double::NA; n]),
            Prototype::Complex => Value::from(vec![Complex::NA; n]),
            Prototype::Character => Value::from(vec![Character::NA; n]),
            Prototype::Raw => Value::from(vec![0u8; n]),
            Prototype::List => Value::list(vec![Value::Null; n]),
            Prototype::Record(r) => {
                let fields = r
                    .fields
                    .iter()
                    .map(|(name, p)| Ok((name.clone(), p.init(n)?)))
                    .collect::<Result<Vec<_>>>()?;
                Value::Record(Record::with_size(fields, n)?)
            }
            Prototype::Extended(x) => Value::Extended(
                Extended::new(x.class.clone(), x.data.init(n)?).with_attrs(x.attrs.clone()),
            ),
            Prototype::Scalar(class) => {
                return Err(Error::Unsupported(class.to_string(), "init"))
            }
        })
    }

    fn name(&self) -> String {
        match self {
            Prototype::Unspecified => "unspecified".to_string(),
            Prototype::Null => "NULL".to_string(),
            Prototype::Record(r) => {
                let fields: Vec<String> = r
                    .fields
                    .iter()
                    .map(|(n, p)| format!("{n}:{}", p.name()))
                    .collect();
                format!("record<{}>", fields.join(", "))
            }
            Prototype::Extended(x) => x.class.to_string(),
            Prototype::Scalar(class) => class.to_string(),
            p => p.kind().to_string(),
        }
    }
}

impl Display for Prototype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.name())
    }
}

/// Derive the prototype of a value
///
/// A non-empty logical vector of only missing values carries no type
/// information and is reported as unspecified, at the top level and as a
/// record field. Storage of extended values is always taken at face value.
///
pub fn ptype_of(x: &Value) -> Prototype {
    ptype_of_impl(x, true)
}

fn ptype_of_impl(x: &Value, unspecified: bool) -> Prototype {
    match x {
        Value::Null => Prototype::Null,
        Value::Vector(v) if unspecified && v.is_unspecified() => Prototype::Unspecified,
        Value::Vector(v) => match v {
            Vector::Logical(_) => Prototype::Logical,
            Vector::Integer(_) => Prototype::Integer,
            Vector::Double(_) => Prototype::Double,
            Vector::Complex(_) => Prototype::Complex,
            Vector::Character(_) => Prototype::Character,
            Vector::Raw(_) => Prototype::Raw,
        },
        Value::List(_) => Prototype::List,
        Value::Record(r) => Prototype::Record(RecordType::new(
            r.fields()
                .iter()
                .map(|(n, v)| (n.clone(), ptype_of_impl(v, unspecified)))
                .collect(),
        )),
        Value::Extended(x) => Prototype::Extended(ExtendedType {
            class: x.class().clone(),
            data: Box::new(ptype_of_impl(x.data(), false)),
            attrs: x.attrs().clone(),
        }),
        Value::Scalar(s) => Prototype::Scalar(s.class().clone()),
    }
}

impl Value {
    pub fn ptype(&self) -> Prototype {
        ptype_of(self)
    }
}
