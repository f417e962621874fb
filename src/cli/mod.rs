//! Command-line interface module.

mod args;
pub mod build;
pub mod head;
pub mod validate;

pub use args::{BuildArgs, Cli, Commands, HeadArgs, ValidateArgs};
