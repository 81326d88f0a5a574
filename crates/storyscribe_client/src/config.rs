//! Connection settings for the chat-completion endpoint

use storyscribe_error::{GenerationError, GenerationErrorKind};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Connection settings for the chat-completion endpoint
///
/// The key is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
    /// Base URL, without the trailing `/chat/completions`
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
}

impl ClientConfig {
    /// Create a configuration for the default endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_BASE_URL` (default: "https://api.openai.com/v1")
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the key is missing or blank.
    pub fn from_env() -> Result<Self, GenerationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create config from any variable source
    ///
    /// # Errors
    ///
    /// Returns an authentication error when the key is missing or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, GenerationError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::Authentication(format!(
                    "{} is not set",
                    API_KEY_VAR
                )))
            })?;
        let base_url = lookup(BASE_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { base_url, api_key })
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
