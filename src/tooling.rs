//! Tooling & Integration Layer
//!
//! Command-line front end for the catalog and the text renderers it uses.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
