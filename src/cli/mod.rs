//! Command-line interface module.

mod args;
pub mod footer;
pub mod mangle;
pub mod tag;

pub use args::{Cli, Commands};
