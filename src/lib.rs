pub mod cli;
pub mod coercion;
pub mod dictionary;
pub mod equality;
pub mod error;
pub mod macros;
pub mod object;
pub mod types;
