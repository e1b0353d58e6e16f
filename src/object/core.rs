use std::fmt::Display;

use crate::error::{Error, Result};

use super::*;

#[derive(Default, Clone, Debug, PartialEq)]
pub enum Value {
    // absence of a value
    #[default]
    Null,

    // vectors
    Vector(Vector),
    List(List),
    Record(Record),
    Extended(Extended),

    // anything that is not a vector
    Scalar(Scalar),
}

impl Value {
    pub fn list(values: Vec<Value>) -> Value {
        Value::List(List::from(values))
    }

    /// Number of observations
    ///
    /// The size of a record is its number of rows, not its number of fields.
    /// `NULL` has size zero. Opaque scalars have no size.
    ///
    pub fn size(&self) -> Result<usize> {
        match self {
            Value::Null => Ok(0),
            Value::Vector(v) => Ok(v.len()),
            Value::List(l) => Ok(l.len()),
            Value::Record(r) => Ok(r.size()),
            Value::Extended(x) => x.data().size(),
            Value::Scalar(s) => Err(Error::Unsupported(s.class().to_string(), "size")),
        }
    }

    /// Materialize the observations at `indices`
    ///
    /// Every index must be less than the value's size.
    ///
    pub fn subset(&self, indices: &[usize]) -> Result<Value> {
        Ok(match self {
            Value::Null => Value::Null,
            Value::Vector(v) => Value::Vector(v.subset(indices)),
            Value::List(l) => Value::List(l.subset(indices)),
            Value::Record(r) => Value::Record(r.subset(indices)?),
            Value::Extended(x) => Value::Extended(x.with_data(x.data().subset(indices)?)),
            Value::Scalar(s) => return Err(Error::Unsupported(s.class().to_string(), "subset")),
        })
    }

    /// Whether two values share their underlying storage
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Vector(l), Value::Vector(r)) => l.ptr_eq(r),
            (Value::List(l), Value::List(r)) => l.ptr_eq(r),
            (Value::Record(l), Value::Record(r)) => {
                l.size() == r.size()
                    && l.fields().len() == r.fields().len()
                    && l.fields()
                        .iter()
                        .zip(r.fields())
                        .all(|((ln, lv), (rn, rv))| ln == rn && lv.ptr_eq(rv))
            }
            (Value::Extended(l), Value::Extended(r)) => {
                l.class() == r.class() && l.attrs() == r.attrs() && l.data().ptr_eq(r.data())
            }
            _ => false,
        }
    }
}

impl From<Vector> for Value {
    fn from(x: Vector) -> Self {
        Value::Vector(x)
    }
}

impl From<Record> for Value {
    fn from(x: Record) -> Self {
        Value::Record(x)
    }
}

impl From<Extended> for Value {
    fn from(x: Extended) -> Self {
        Value::Extended(x)
    }
}

impl<T> From<Vec<T>> for Value
where
    Vector: From<Vec<T>>,
{
    fn from(x: Vec<T>) -> Self {
        Value::Vector(Vector::from(x))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Vector(v) => write!(f, "{v}"),
            Value::List(l) => {
                write!(f, "list(")?;
                for (i, x) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, ")")
            }
            Value::Record(r) => {
                write!(f, "record(")?;
                for (i, (name, x)) in r.fields().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name} = {x}")?;
                }
                write!(f, ")")
            }
            Value::Extended(x) => write!(f, "<{}>{}", x.class(), x.data()),
            Value::Scalar(s) => write!(f, "<{}>", s.class()),
        }
    }
}
