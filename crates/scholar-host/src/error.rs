//! Error types for host operations.

use thiserror::Error;

/// Host error types
#[derive(Error, Debug)]
pub enum HostError {
    /// A line that is not a valid message
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error on the message stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
