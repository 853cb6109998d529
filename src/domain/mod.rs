//! Domain models for the configuration console

mod env;
mod label;
mod project;
mod property;

pub use env::*;
pub use label::*;
pub use project::*;
pub use property::*;
