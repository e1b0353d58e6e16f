//! Common types and casting
//!
//! Common-type resolution is a pairwise join over prototypes. Casting
//! converts values to a resolved prototype, reporting positions that lost
//! information.

pub mod atomic;

mod cast;
pub use cast::*;

mod common;
pub use common::*;

mod lossy;
pub use lossy::*;
