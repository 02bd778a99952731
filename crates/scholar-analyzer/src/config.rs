//! Configuration for the Analyzer

use crate::error::AnalyzerError;
use scholar_llm::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use scholar_llm::GeminiProvider;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API key unless configured otherwise
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Remote text-generation endpoint settings
///
/// The API key itself is never stored here; only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Scheme and host of the Gemini API
    pub endpoint: String,

    /// Model name
    pub model: String,

    /// Environment variable to read the API key from
    pub api_key_env: String,

    /// HTTP timeout for one request (seconds)
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ProviderConfig {
    /// Resolve the API key: an explicit value wins, then the environment
    pub fn resolve_api_key(&self, explicit: Option<String>) -> Result<String, AnalyzerError> {
        explicit
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AnalyzerError::Config(format!(
                    "API key not set. Export {} or pass it explicitly",
                    self.api_key_env
                ))
            })
    }

    /// Build a Gemini provider from these settings
    pub fn build_provider(&self, api_key: Option<String>) -> Result<GeminiProvider, AnalyzerError> {
        let key = self.resolve_api_key(api_key)?;
        let provider = GeminiProvider::new(key)?
            .with_endpoint(self.endpoint.as_str())
            .with_model(self.model.as_str())
            .with_timeout(Duration::from_secs(self.timeout_secs))?;
        Ok(provider)
    }
}

/// Configuration for the Analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum time for a whole analysis, dispatch included (seconds)
    pub request_timeout_secs: u64,

    /// Interval between status checks when waiting for a result (milliseconds)
    pub poll_interval_ms: u64,

    /// Remote endpoint settings
    pub provider: ProviderConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 120,
            poll_interval_ms: 1_000,
            provider: ProviderConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the poll interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be greater than 0".to_string());
        }
        if self.provider.timeout_secs == 0 {
            return Err("provider.timeout_secs must be greater than 0".to_string());
        }
        if self.provider.model.trim().is_empty() {
            return Err("provider.model must not be empty".to_string());
        }
        if !self.provider.endpoint.starts_with("http://")
            && !self.provider.endpoint.starts_with("https://")
        {
            return Err(format!(
                "provider.endpoint must be an http(s) URL, got '{}'",
                self.provider.endpoint
            ));
        }
        if self.provider.api_key_env.trim().is_empty() {
            return Err("provider.api_key_env must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AnalyzerError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: AnalyzerConfig = toml::from_str(&contents)?;
        config.validate().map_err(AnalyzerError::Config)?;
        Ok(config)
    }
}
