//! Value constructors
//!
//! Build atomic vectors in place, accepting `NA` for missing elements:
//!
//! ```
//! use rvec::{chr, int, lgl};
//!
//! let x = lgl![true, NA, false];
//! let y = int![1, -2, NA];
//! let z = chr!["a", NA];
//! assert_eq!(x.size().unwrap(), 3);
//! ```

#[macro_export]
macro_rules! atomic {
    ($ty:ident; $($x:expr),* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::object::NA;
        let values: ::std::vec::Vec<$crate::object::$ty> =
            ::std::vec![$($crate::object::$ty::from($x)),*];
        $crate::object::Value::from(values)
    }};
}

#[macro_export]
macro_rules! lgl {
    ($($x:expr),* $(,)?) => { $crate::atomic!(Logical; $($x),*) };
}

#[macro_export]
macro_rules! int {
    ($($x:expr),* $(,)?) => { $crate::atomic!(Integer; $($x),*) };
}

#[macro_export]
macro_rules! dbl {
    ($($x:expr),* $(,)?) => { $crate::atomic!(Double; $($x),*) };
}

#[macro_export]
macro_rules! cpl {
    ($($x:expr),* $(,)?) => { $crate::atomic!(Complex; $($x),*) };
}

#[macro_export]
macro_rules! chr {
    ($($x:expr),* $(,)?) => { $crate::atomic!(Character; $($x),*) };
}

/// Build a record value from `name = value` pairs
///
/// # Panics
///
/// When the fields are not all of the same size.
///
#[macro_export]
macro_rules! record {
    ($($name:ident = $x:expr),* $(,)?) => {
        $crate::object::Value::Record(
            $crate::object::Record::new(::std::vec![
                $((::std::string::String::from(stringify!($name)), $x)),*
            ])
            .unwrap_or_else(|e| panic!("{e}"))
        )
    };
}
