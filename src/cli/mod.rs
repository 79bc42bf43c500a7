pub mod commands;
pub mod convert;
pub mod validate;

pub use commands::{Cli, Commands};
