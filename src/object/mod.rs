mod core;
pub use core::*;

mod extended;
pub use extended::*;

mod list;
pub use list::*;

mod record;
pub use record::*;

pub mod shared;

pub mod vector;
pub use vector::*;
