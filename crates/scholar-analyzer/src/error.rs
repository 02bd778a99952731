//! Error types for the Analyzer

use scholar_llm::LlmError;
use thiserror::Error;

/// Errors that can occur during an analysis
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The dispatch to the text-generation endpoint failed
    #[error(transparent)]
    Dispatch(#[from] LlmError),

    /// Another analysis is still in flight
    #[error("An analysis is already running")]
    Busy,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The spawned analysis task did not complete
    #[error("Analysis task failed: {0}")]
    Task(String),
}

impl AnalyzerError {
    /// Human-readable guidance for the presentation layer
    ///
    /// Known status codes get an explanation; every other failure is shown
    /// as its raw message.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzerError::Dispatch(LlmError::HttpStatus { status: 403, .. }) => {
                "API key is invalid or not authorized.".to_string()
            }
            AnalyzerError::Dispatch(LlmError::HttpStatus { status: 429, .. }) => {
                "API quota exceeded. Please try again later.".to_string()
            }
            AnalyzerError::Dispatch(LlmError::HttpStatus { status: 404, .. }) => {
                "API endpoint or model not found. Check the configured endpoint and model."
                    .to_string()
            }
            AnalyzerError::Busy => {
                "An analysis is already running. Please wait for it to finish.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<toml::de::Error> for AnalyzerError {
    fn from(e: toml::de::Error) -> Self {
        AnalyzerError::Config(format!("Failed to parse TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16, text: &str) -> AnalyzerError {
        AnalyzerError::Dispatch(LlmError::HttpStatus {
            status: code,
            status_text: text.to_string(),
        })
    }

    #[test]
    fn test_known_status_codes_are_mapped() {
        assert_eq!(status(403, "Forbidden").user_message(), "API key is invalid or not authorized.");
        assert_eq!(
            status(429, "Too Many Requests").user_message(),
            "API quota exceeded. Please try again later."
        );
        assert!(status(404, "Not Found").user_message().contains("not found"));
    }

    #[test]
    fn test_other_status_codes_are_raw() {
        assert_eq!(
            status(503, "Service Unavailable").user_message(),
            "API error: 503 Service Unavailable"
        );
    }

    #[test]
    fn test_transport_and_malformed_are_verbatim() {
        let err = AnalyzerError::from(LlmError::Transport("dns error".into()));
        assert_eq!(err.user_message(), "Request failed: dns error");

        let err = AnalyzerError::from(LlmError::MalformedResponse("no text".into()));
        assert_eq!(err.user_message(), "Invalid API response: no text");
    }
}
