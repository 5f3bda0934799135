//! Command-line interface module.

mod args;
pub mod check;
pub mod generate;
pub mod report;

pub use args::{CheckArgs, Cli, Commands, GenerateArgs};
