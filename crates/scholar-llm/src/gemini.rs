//! Gemini Provider Implementation
//!
//! Provides integration with Google's Gemini `generateContent` API.
//!
//! # Features
//!
//! - Async HTTP communication with the Gemini REST API
//! - Configurable endpoint, model and timeout
//! - API key sent as the `x-goog-api-key` header, never logged
//! - Single attempt per call; failures are classified, not retried
//!
//! # Examples
//!
//! ```no_run
//! use scholar_llm::GeminiProvider;
//!
//! # async fn example() -> Result<(), scholar_llm::LlmError> {
//! let key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
//! let provider = GeminiProvider::new(key)?.with_model("gemini-2.5-flash");
//! let text = provider.generate_content("Summarise this paper: ...").await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use scholar_domain::traits::TextGenerator;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Gemini API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default timeout for a single request (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

/// Request body for the generateContent API
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response from the generateContent API
///
/// Only the path `candidates[0].content.parts[0].text` is read; every level
/// is optional so a missing piece becomes a malformed-response error instead
/// of a decode error.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|text| !text.is_empty())
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider with the default endpoint, model and timeout
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Transport` if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
        })
    }

    /// Use a different model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a different endpoint (scheme and host, no path)
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a different request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Model in use
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full generateContent URL
    pub fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Generate text from a prompt
    ///
    /// # Errors
    ///
    /// - `Transport` if no response arrives
    /// - `HttpStatus` if the endpoint answers with a non-success status
    /// - `MalformedResponse` if the body has no generated text
    pub async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.url();
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!("Sending generateContent request: model {}, prompt {} chars", self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!("generateContent returned {}", status);
            return Err(LlmError::HttpStatus {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                if e.is_decode() {
                    LlmError::MalformedResponse(format!("Failed to parse response: {}", e))
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        body.into_text().ok_or_else(|| {
            LlmError::MalformedResponse("no text at candidates[0].content.parts[0]".to_string())
        })
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl TextGenerator for GeminiProvider {
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.generate_content(prompt).await
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Transport(format!("Failed to create HTTP client: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Option<String> {
        serde_json::from_str::<GenerateContentResponse>(json)
            .unwrap()
            .into_text()
    }

    #[test]
    fn test_gemini_provider_creation() {
        let provider = GeminiProvider::new("key").unwrap();
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_url_building() {
        let provider = GeminiProvider::new("key")
            .unwrap()
            .with_endpoint("http://localhost:8080/")
            .with_model("gemini-pro");
        assert_eq!(
            provider.url(),
            "http://localhost:8080/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = GeminiProvider::new("super-secret").unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hi" }],
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[test]
    fn test_extract_text() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"1. Summary: ok"}],"role":"model"}}]}"#;
        assert_eq!(parse(json).as_deref(), Some("1. Summary: ok"));
    }

    #[test]
    fn test_extract_text_missing_levels() {
        assert_eq!(parse(r#"{}"#), None);
        assert_eq!(parse(r#"{"candidates":[]}"#), None);
        assert_eq!(parse(r#"{"candidates":[{}]}"#), None);
        assert_eq!(parse(r#"{"candidates":[{"content":{"parts":[]}}]}"#), None);
        assert_eq!(parse(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#), None);
        assert_eq!(parse(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#), None);
    }

    #[tokio::test]
    async fn test_gemini_transport_error() {
        // Nothing listens on port 1
        let provider = GeminiProvider::new("key")
            .unwrap()
            .with_endpoint("http://127.0.0.1:1");

        let result = provider.generate_content("test").await;
        match result {
            Err(LlmError::Transport(_)) => {} // Expected
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }
}
