use core::fmt;

use crate::object::Value;
use crate::types::Prototype;

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! internal_err {
    () => {
        $crate::error::Error::Internal(None, std::file!(), std::line!())
    };
    ( $x:expr ) => {
        $crate::error::Error::Internal(Some($x.to_string()), std::file!(), std::line!())
    };
}

#[macro_export]
macro_rules! err {
    ( $x:expr ) => {
        $crate::error::Error::Other($x.to_string())
    };
}

/// A pair of prototypes that could not be brought together
///
/// Carried by both incompatible-type and incompatible-cast conditions. `x` is
/// the left-hand (or source) prototype and `y` the right-hand (or
/// destination) prototype.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Incompatible {
    pub x: Prototype,
    pub y: Prototype,
    /// Position of the offending input when resolving across many inputs
    pub index: Option<usize>,
    /// Record field at which the pair was found, if nested
    pub field: Option<String>,
}

impl Incompatible {
    pub fn new(x: &Prototype, y: &Prototype) -> Self {
        Incompatible {
            x: x.clone(),
            y: y.clone(),
            index: None,
            field: None,
        }
    }
}

/// A cast that produced a result but discarded information
#[derive(Debug, Clone, PartialEq)]
pub struct LossyCast {
    pub x: Prototype,
    pub to: Prototype,
    /// 0-based positions that changed or became missing
    pub locations: Vec<usize>,
    /// The converted value, as it would have been returned
    pub result: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    IncompatibleType(Box<Incompatible>),
    IncompatibleCast(Box<Incompatible>),
    LossyCast(Box<LossyCast>),

    // operation not available for a kind, (kind, operation)
    Unsupported(String, &'static str),
    IncompatibleSize(usize, usize),
    Other(String),

    Internal(Option<String>, &'static str, u32),
}

impl Error {
    pub fn incompatible_type(x: &Prototype, y: &Prototype) -> Self {
        Error::IncompatibleType(Box::new(Incompatible::new(x, y)))
    }

    pub fn incompatible_cast(x: &Prototype, to: &Prototype) -> Self {
        Error::IncompatibleCast(Box::new(Incompatible::new(x, to)))
    }

    /// Attach the index of the offending input to an incompatibility
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Error::IncompatibleType(mut i) => {
                i.index.get_or_insert(index);
                Error::IncompatibleType(i)
            }
            Error::IncompatibleCast(mut i) => {
                i.index.get_or_insert(index);
                Error::IncompatibleCast(i)
            }
            e => e,
        }
    }

    /// Attach the record field at which an incompatibility was found
    pub fn in_field(self, field: &str) -> Self {
        match self {
            Error::IncompatibleType(mut i) => {
                i.field.get_or_insert_with(|| field.to_string());
                Error::IncompatibleType(i)
            }
            Error::IncompatibleCast(mut i) => {
                i.field.get_or_insert_with(|| field.to_string());
                Error::IncompatibleCast(i)
            }
            e => e,
        }
    }

    fn as_str(&self) -> String {
        fn located(i: &Incompatible) -> String {
            let mut s = String::new();
            if let Some(index) = i.index {
                s.push_str(&format!(" (input {index})"));
            }
            if let Some(field) = &i.field {
                s.push_str(&format!(" in field '{field}'"));
            }
            s
        }

        match self {
            Error::IncompatibleType(i) => {
                format!("can't combine {} and {}{}", i.x, i.y, located(i))
            }
            Error::IncompatibleCast(i) => {
                format!("can't convert {} to {}{}", i.x, i.y, located(i))
            }
            Error::LossyCast(l) => {
                let n = l.locations.len();
                let shown: Vec<String> = l.locations.iter().take(5).map(|i| i.to_string()).collect();
                let more = if n > 5 { ", ..." } else { "" };
                format!(
                    "can't convert from {} to {} due to loss of precision at {} location(s): {}{}",
                    l.x,
                    l.to,
                    n,
                    shown.join(", "),
                    more
                )
            }
            Error::Unsupported(kind, op) => format!("unsupported type '{kind}' in '{op}'"),
            Error::IncompatibleSize(x, y) => {
                format!("can't recycle input of size {x} to size {y}")
            }
            Error::Other(s) => s.to_string(),
            Error::Internal(None, file, line) => format!("Internal Error ({file}:{line})"),
            Error::Internal(Some(msg), file, line) => {
                format!("Internal Error ({file}:{line})\n{msg}")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error: {}", self.as_str())
    }
}

impl std::error::Error for Error {}

impl<T> From<Error> for Result<T> {
    fn from(val: Error) -> Self {
        Err(val)
    }
}
