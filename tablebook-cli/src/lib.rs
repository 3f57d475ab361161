//! Library exports for tablebook-cli.
//!
//! This module exports the CLI structure for use by the binary, the tests
//! and shell completion generation.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod utils;

pub use cli::Cli;
