pub mod beacon;
pub mod common;
mod macros;
