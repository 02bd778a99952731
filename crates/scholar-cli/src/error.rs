//! Error types for the CLI application.

use crate::source::SourceError;
use scholar_analyzer::AnalyzerError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analyzer error, shown with its user-facing message
    #[error("{}", .0.user_message())]
    Analyzer(#[from] AnalyzerError),

    /// The analysis ran but failed; carries the user-facing message
    #[error("{0}")]
    AnalysisFailed(String),

    /// Source error
    #[error(transparent)]
    Source(#[from] SourceError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
