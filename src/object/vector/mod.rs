//! Atomic vectors
//!
//! Each atomic kind is a [`Rep`] of its element type, where every element
//! type except raw bytes wraps its values in [`OptionNA`] to carry a missing
//! marker.
//!
pub mod rep;
pub mod types;

mod core;
pub use core::*;

pub use rep::Rep;
pub use types::*;
