pub mod hash;

mod equal;
pub use equal::*;

mod proxy;
pub use proxy::*;
