use std::fmt::Display;

use super::OptionNA;

/// A complex number
///
/// Either part may be `NaN`; an entirely absent value is represented by
/// wrapping in [`OptionNA`] instead.
///
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Cplx {
    pub re: f64,
    pub im: f64,
}

impl Cplx {
    pub fn new(re: f64, im: f64) -> Self {
        Cplx { re, im }
    }
}

impl Display for Cplx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im.is_sign_negative() {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

pub type Logical = OptionNA<bool>;
pub type Integer = OptionNA<i32>;
pub type Double = OptionNA<f64>;
pub type Complex = OptionNA<Cplx>;
pub type Character = OptionNA<String>;

/// Raw bytes carry no missing representation
pub type Raw = u8;
