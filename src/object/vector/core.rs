use std::fmt::Debug;
use std::fmt::Display;

use super::rep::Rep;
use super::types::*;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum OptionNA<T> {
    #[default]
    NA,
    Some(T),
}

impl<T> OptionNA<T> {
    pub fn map<F, U>(self, f: F) -> OptionNA<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            OptionNA::Some(x) => OptionNA::Some(f(x)),
            OptionNA::NA => OptionNA::NA,
        }
    }

    pub fn as_ref(&self) -> OptionNA<&T> {
        match self {
            OptionNA::Some(x) => OptionNA::Some(x),
            OptionNA::NA => OptionNA::NA,
        }
    }

    pub fn as_option(self) -> Option<T> {
        match self {
            OptionNA::Some(x) => Option::Some(x),
            OptionNA::NA => Option::None,
        }
    }

    pub fn is_na(&self) -> bool {
        matches!(self, OptionNA::NA)
    }
}

impl<T> From<Option<T>> for OptionNA<T> {
    fn from(x: Option<T>) -> Self {
        match x {
            Some(x) => OptionNA::Some(x),
            None => OptionNA::NA,
        }
    }
}

/// Stand-in for a missing element when building vectors
///
/// Converts into the missing marker of any atomic type, which lets
/// constructors like [`crate::lgl!`] accept `NA` alongside values.
///
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NA;

impl<T> From<NA> for OptionNA<T> {
    fn from(_: NA) -> Self {
        OptionNA::NA
    }
}

impl From<bool> for Logical {
    fn from(x: bool) -> Self {
        OptionNA::Some(x)
    }
}

impl From<i32> for Integer {
    fn from(x: i32) -> Self {
        OptionNA::Some(x)
    }
}

impl From<f64> for Double {
    fn from(x: f64) -> Self {
        OptionNA::Some(x)
    }
}

impl From<Cplx> for Complex {
    fn from(x: Cplx) -> Self {
        OptionNA::Some(x)
    }
}

impl From<&str> for Character {
    fn from(x: &str) -> Self {
        OptionNA::Some(x.to_string())
    }
}

impl From<String> for Character {
    fn from(x: String) -> Self {
        OptionNA::Some(x)
    }
}

impl<T> Display for OptionNA<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionNA::Some(x) => write!(f, "{}", x),
            OptionNA::NA => write!(f, "NA"),
        }
    }
}

/// Atomic vectors
#[derive(Debug, Clone, PartialEq)]
pub enum Vector {
    Logical(Rep<Logical>),
    Integer(Rep<Integer>),
    Double(Rep<Double>),
    Complex(Rep<Complex>),
    Character(Rep<Character>),
    Raw(Rep<Raw>),
}

impl Vector {
    pub fn len(&self) -> usize {
        use Vector::*;
        match self {
            Logical(v) => v.len(),
            Integer(v) => v.len(),
            Double(v) => v.len(),
            Complex(v) => v.len(),
            Character(v) => v.len(),
            Raw(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subset(&self, indices: &[usize]) -> Self {
        use Vector::*;
        match self {
            Logical(v) => Logical(v.subset(indices)),
            Integer(v) => Integer(v.subset(indices)),
            Double(v) => Double(v.subset(indices)),
            Complex(v) => Complex(v.subset(indices)),
            Character(v) => Character(v.subset(indices)),
            Raw(v) => Raw(v.subset(indices)),
        }
    }

    /// Whether two vectors are the same allocation of the same type
    pub fn ptr_eq(&self, other: &Vector) -> bool {
        use Vector::*;
        match (self, other) {
            (Logical(l), Logical(r)) => l.ptr_eq(r),
            (Integer(l), Integer(r)) => l.ptr_eq(r),
            (Double(l), Double(r)) => l.ptr_eq(r),
            (Complex(l), Complex(r)) => l.ptr_eq(r),
            (Character(l), Character(r)) => l.ptr_eq(r),
            (Raw(l), Raw(r)) => l.ptr_eq(r),
            _ => false,
        }
    }

    /// A logical vector with every element missing
    ///
    /// Such a vector carries no type information of its own and is treated as
    /// unspecified when deriving prototypes.
    ///
    pub fn is_unspecified(&self) -> bool {
        match self {
            Vector::Logical(v) => !v.is_empty() && v.iter().all(|x| x.is_na()),
            _ => false,
        }
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Vector::Logical(x) => {
                let x = x.map(|i| i.as_ref().map(|b| if *b { "TRUE" } else { "FALSE" }));
                Display::fmt(&x, f)
            }
            Vector::Integer(x) => Display::fmt(&x, f),
            Vector::Double(x) => Display::fmt(&x, f),
            Vector::Complex(x) => Display::fmt(&x, f),
            Vector::Character(x) => {
                let x = x.map(|i| i.as_ref().map(|s| format!("{s:?}")));
                Display::fmt(&x, f)
            }
            Vector::Raw(x) => {
                let x = x.map(|i| format!("{i:02x}"));
                Display::fmt(&x, f)
            }
        }
    }
}

macro_rules! vector_from {
    ($variant:ident, $elem:ty, $na:ty) => {
        impl From<Vec<$na>> for Vector {
            fn from(x: Vec<$na>) -> Self {
                Vector::$variant(x.into())
            }
        }

        impl From<Vec<$elem>> for Vector {
            fn from(x: Vec<$elem>) -> Self {
                Vector::$variant(x.into_iter().map(OptionNA::Some).collect())
            }
        }

        impl From<Rep<$na>> for Vector {
            fn from(x: Rep<$na>) -> Self {
                Vector::$variant(x)
            }
        }
    };
}

vector_from!(Logical, bool, Logical);
vector_from!(Integer, i32, Integer);
vector_from!(Double, f64, Double);
vector_from!(Complex, Cplx, Complex);
vector_from!(Character, String, Character);

impl From<Vec<u8>> for Vector {
    fn from(x: Vec<u8>) -> Self {
        Vector::Raw(x.into())
    }
}

impl From<Rep<u8>> for Vector {
    fn from(x: Rep<u8>) -> Self {
        Vector::Raw(x)
    }
}

impl From<Vec<&str>> for Vector {
    fn from(x: Vec<&str>) -> Self {
        Vector::Character(x.into_iter().map(Character::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_na_conversions() {
        assert_eq!(Logical::from(NA), OptionNA::NA);
        assert_eq!(Integer::from(3), OptionNA::Some(3));
        assert_eq!(Character::from("a"), OptionNA::Some("a".to_string()));
        assert_eq!(Double::from(Some(1.5)), OptionNA::Some(1.5));
        assert!(Double::from(None).is_na());
    }

    #[test]
    fn unspecified_detection() {
        let x = Vector::from(vec![Logical::NA, Logical::NA]);
        assert!(x.is_unspecified());

        let x = Vector::from(vec![Logical::NA, Logical::Some(true)]);
        assert!(!x.is_unspecified());

        let x = Vector::from(Vec::<Logical>::new());
        assert!(!x.is_unspecified());

        let x = Vector::from(vec![Integer::NA]);
        assert!(!x.is_unspecified());
    }

    #[test]
    fn display() {
        let x = Vector::from(vec![Logical::Some(true), Logical::NA]);
        assert_eq!(x.to_string(), "[TRUE, NA]");

        let x = Vector::from(vec!["a", "b"]);
        assert_eq!(x.to_string(), r#"["a", "b"]"#);

        let x = Vector::from(vec![1u8, 255u8]);
        assert_eq!(x.to_string(), "[01, ff]");
    }

    #[test]
    fn subset_keeps_type() {
        let x = Vector::from(vec![1, 2, 3]);
        assert_eq!(x.subset(&[1]), Vector::from(vec![2]));
        assert!(!x.ptr_eq(&x.subset(&[0, 1, 2])));
        assert!(x.ptr_eq(&x.clone()));
    }
}
