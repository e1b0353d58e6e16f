use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

use super::Value;

/// Type identity of an extended or opaque type
///
/// Two extended values share a type only when their class identities match;
/// the identity is also the key under which rules for the type are
/// registered.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(Arc<str>);

impl ClassId {
    pub fn new(class: &str) -> Self {
        ClassId(Arc::from(class))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassId {
    fn from(x: &str) -> Self {
        ClassId::new(x)
    }
}

impl Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attributes an extended type needs to rebuild its values
pub type Attrs = BTreeMap<String, String>;

/// A user-defined vector type
///
/// The values themselves are stored in an ordinary `data` value; the class
/// identity and attributes decide how the type resolves, casts and compares.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Extended {
    class: ClassId,
    data: Box<Value>,
    attrs: Attrs,
}

impl Extended {
    pub fn new<C: Into<ClassId>>(class: C, data: Value) -> Self {
        Extended {
            class: class.into(),
            data: Box::new(data),
            attrs: Attrs::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn class(&self) -> &ClassId {
        &self.class
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    /// Rewrap new data under this value's class and attributes
    pub fn with_data(&self, data: Value) -> Self {
        Extended {
            class: self.class.clone(),
            data: Box::new(data),
            attrs: self.attrs.clone(),
        }
    }
}

/// A value that is not a vector, such as a function or an environment
///
/// Opaque scalars only carry a class name; they have no size and cannot be
/// resolved, cast or compared.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scalar {
    class: ClassId,
}

impl Scalar {
    pub fn new<C: Into<ClassId>>(class: C) -> Self {
        Scalar {
            class: class.into(),
        }
    }

    pub fn class(&self) -> &ClassId {
        &self.class
    }
}
