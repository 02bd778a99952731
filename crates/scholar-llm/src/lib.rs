//! Scholar LLM Provider Layer
//!
//! Implementations of the `TextGenerator` trait from `scholar-domain`.
//! Every provider makes a single attempt per call and reports failures
//! through one error taxonomy, [`LlmError`].
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use scholar_llm::MockProvider;
//! use scholar_domain::traits::TextGenerator;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = rt.block_on(provider.generate("test prompt")).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use scholar_domain::traits::TextGenerator;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during a dispatch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// No response reached us (offline, DNS, connect failure, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status
    #[error("API error: {status} {status_text}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase, possibly empty
        status_text: String,
    },

    /// The body arrived but the generated text could not be found in it
    #[error("Invalid API response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// HTTP status code, for `HttpStatus` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-readable kind
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Transport(_) => "transport",
            LlmError::HttpStatus { .. } => "http_status",
            LlmError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses are matched by substring: the first registered fragment found
/// in the prompt wins, otherwise the default response is returned.
///
/// # Examples
///
/// ```
/// use scholar_llm::{LlmError, MockProvider};
/// use scholar_domain::traits::TextGenerator;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
///
/// let mut provider = MockProvider::default();
/// provider.add_response("quantum", "1. Summary: qubits");
/// provider.add_error("offline", LlmError::Transport("no route".into()));
///
/// assert_eq!(rt.block_on(provider.generate("a quantum paper")).unwrap(), "1. Summary: qubits");
/// assert!(rt.block_on(provider.generate("offline paper")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, Result<String, LlmError>)>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
            delay: None,
        }
    }

    /// Create a MockProvider that fails every call with `error`
    pub fn failing(error: LlmError) -> Self {
        let mut provider = Self::default();
        provider.add_error("", error);
        provider
    }

    /// Sleep for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answer `response` to prompts containing `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).push((fragment.into(), Ok(response.into())));
    }

    /// Fail prompts containing `fragment` with `error`
    pub fn add_error(&mut self, fragment: impl Into<String>, error: LlmError) {
        lock(&self.responses).push((fragment.into(), Err(error)));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent prompt received
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.last_prompt).clone()
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_prompt) = Some(prompt.to_string());

        lock(&self.responses)
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Ok(self.default_response.clone()))
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextGenerator for MockProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let outcome = self.respond(prompt);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        outcome
    }
}

// Mock state stays usable after a panicking test thread.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_fragment_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("say hello").await.unwrap(), "world");
        assert_eq!(provider.generate("foo!").await.unwrap(), "bar");
        assert_eq!(provider.generate("unknown").await.unwrap(), "Default mock response");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("prompt2").await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.last_prompt().as_deref(), Some("prompt2"));

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error(
            "bad prompt",
            LlmError::HttpStatus { status: 429, status_text: "Too Many Requests".into() },
        );

        let err = provider.generate("a bad prompt").await.unwrap_err();
        assert_eq!(err.status(), Some(429));
    }

    #[tokio::test]
    async fn test_mock_provider_failing() {
        let provider = MockProvider::failing(LlmError::MalformedResponse("empty".into()));
        let err = provider.generate("anything").await.unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = LlmError::HttpStatus { status: 429, status_text: "Too Many Requests".into() };
        assert_eq!(err.to_string(), "API error: 429 Too Many Requests");
        assert_eq!(err.kind(), "http_status");

        let err = LlmError::MalformedResponse("no candidates".into());
        assert_eq!(err.to_string(), "Invalid API response: no candidates");
        assert_eq!(err.status(), None);
    }
}
