//! Command-line interface module.

mod args;
pub mod list;
pub mod tidy;

pub use args::{Cli, Commands};
