use crate::object::{Value, Vector};

/// Coarse categories of values used for dispatch
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum KindTag {
    Null,
    Logical,
    Integer,
    Double,
    Complex,
    Character,
    Raw,
    List,
    Record,
    Extended,
    Scalar,
}

impl KindTag {
    /// Kinds whose elements are stored inline in an atomic vector
    pub fn is_atomic(&self) -> bool {
        use KindTag::*;
        matches!(self, Logical | Integer | Double | Complex | Character | Raw)
    }

    /// Kinds whose common type follows the fixed promotion table
    pub fn is_primitive(&self) -> bool {
        self.is_atomic() || matches!(self, KindTag::List)
    }

    pub fn is_vector(&self) -> bool {
        self.is_primitive() || matches!(self, KindTag::Record)
    }
}

impl From<&Vector> for KindTag {
    fn from(x: &Vector) -> Self {
        match x {
            Vector::Logical(_) => KindTag::Logical,
            Vector::Integer(_) => KindTag::Integer,
            Vector::Double(_) => KindTag::Double,
            Vector::Complex(_) => KindTag::Complex,
            Vector::Character(_) => KindTag::Character,
            Vector::Raw(_) => KindTag::Raw,
        }
    }
}

/// Categorize a value
///
/// Classification only looks at how a value is declared, never at its
/// contents. Tabular records are recognized before extended types, so a
/// record, or an extended type stored as a record, is never routed through
/// extended dispatch.
///
/// With `dispatch` off, an extended value is classified by its underlying
/// storage instead: atomic storage reports its atomic kind and anything else
/// reports an opaque scalar. This is how a type's own rules can classify its
/// canonical representation without re-entering dispatch.
///
pub fn classify(x: &Value, dispatch: bool) -> KindTag {
    match x {
        Value::Null => KindTag::Null,
        Value::Vector(v) => KindTag::from(v),
        Value::List(_) => KindTag::List,
        Value::Record(_) => KindTag::Record,
        Value::Extended(x) if matches!(x.data(), Value::Record(_)) => KindTag::Record,
        Value::Extended(_) if dispatch => KindTag::Extended,
        Value::Extended(x) => match x.data() {
            Value::Vector(v) => KindTag::from(v),
            _ => KindTag::Scalar,
        },
        Value::Scalar(_) => KindTag::Scalar,
    }
}

/// Whether a value behaves as a vector
///
/// Extended values are vectors when their storage, classified without
/// dispatch, is one.
///
pub fn is_vector(x: &Value) -> bool {
    fn is_vector_rec(x: &Value, dispatch: bool) -> bool {
        match classify(x, dispatch) {
            KindTag::Extended => match x {
                Value::Extended(ext) => is_vector_rec(ext.data(), false),
                _ => false,
            },
            kind => kind.is_vector(),
        }
    }

    is_vector_rec(x, true)
}

impl Value {
    pub fn is_vector(&self) -> bool {
        is_vector(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Extended, Scalar};
    use crate::{chr, int, lgl, record};
    use strum::IntoEnumIterator;

    #[test]
    fn classify_primitives() {
        assert_eq!(classify(&Value::Null, true), KindTag::Null);
        assert_eq!(classify(&lgl![true], true), KindTag::Logical);
        assert_eq!(classify(&int![1], true), KindTag::Integer);
        assert_eq!(classify(&chr!["a"], true), KindTag::Character);
        assert_eq!(classify(&Value::from(vec![1u8]), true), KindTag::Raw);
        assert_eq!(classify(&Value::list(vec![]), true), KindTag::List);
    }

    #[test]
    fn classify_does_not_inspect_contents() {
        assert_eq!(classify(&lgl![NA, NA], true), KindTag::Logical);
        assert_eq!(classify(&lgl![], true), KindTag::Logical);
    }

    #[test]
    fn records_are_tabular_regardless_of_dispatch() {
        let x = record!(a = int![1]);
        assert_eq!(classify(&x, true), KindTag::Record);
        assert_eq!(classify(&x, false), KindTag::Record);
    }

    #[test]
    fn classed_records_are_tabular() {
        let x = Value::from(Extended::new("tbl", record!(a = int![1])));
        assert_eq!(classify(&x, true), KindTag::Record);
        assert_eq!(classify(&x, false), KindTag::Record);
        assert!(x.is_vector());
    }

    #[test]
    fn extended_without_dispatch() {
        let x = Value::from(Extended::new("pct", int![1, 2]));
        assert_eq!(classify(&x, true), KindTag::Extended);
        assert_eq!(classify(&x, false), KindTag::Integer);

        let x = Value::from(Extended::new("rcrd", Value::list(vec![])));
        assert_eq!(classify(&x, false), KindTag::Scalar);
    }

    #[test]
    fn vectors() {
        assert!(int![1].is_vector());
        assert!(is_vector(&record!(a = int![1])));
        assert!(is_vector(&Value::from(Extended::new("pct", int![1]))));
        assert!(!is_vector(&Value::Null));
        assert!(!is_vector(&Value::Scalar(Scalar::new("function"))));
        assert!(!is_vector(&Value::from(Extended::new(
            "nested",
            Value::from(Extended::new("pct", int![1]))
        ))));
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in KindTag::iter() {
            let name = kind.to_string();
            assert_eq!(name.parse::<KindTag>(), Ok(kind));
        }
        assert_eq!(KindTag::Record.to_string(), "record");
    }
}
