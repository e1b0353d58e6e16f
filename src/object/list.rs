use super::vector::Rep;
use super::Value;

/// Lists hold arbitrary values, with `Value::Null` as an absent element
pub type List = Rep<Value>;
