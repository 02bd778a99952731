//! Scholar CLI library.
//!
//! This library provides the core functionality for the Scholar command-line interface,
//! including configuration management, paper sources, command execution, exports and
//! output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod source;
pub mod stats;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
