mod core;
pub use core::*;

mod count;
pub use count::*;

pub(crate) mod ops;
pub use ops::*;

mod split;
pub use split::*;
