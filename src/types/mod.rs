//! Type identity: classification, prototypes and the rule registry

mod kind;
pub use kind::*;

mod ptype;
pub use ptype::*;

mod registry;
pub use registry::*;
