//! Connection settings for the text-generation service.

use derive_getters::Getters;
use std::time::Duration;
use twain_error::{BuilderError, ModelError, ModelErrorKind};

/// Default OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Configuration for an OpenAI-compatible chat endpoint.
///
/// # Examples
///
/// ```
/// use twain_models::ChatConfigBuilder;
///
/// let config = ChatConfigBuilder::default()
///     .api_key(Some("sk-test".to_string()))
///     .build()
///     .unwrap();
/// assert_eq!(config.model(), "gpt-3.5-turbo");
/// assert_eq!(config.base_url(), "https://api.openai.com/v1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(error = "BuilderError"))]
pub struct ChatConfig {
    /// Base URL up to and including the API version segment
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Model identifier to use for completions
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// Bearer key; required by hosted providers
    #[builder(default)]
    api_key: Option<String>,
    /// Per-request timeout
    #[builder(default = "Duration::from_secs(60)")]
    timeout: Duration,
}

impl ChatConfig {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_BASE_URL` (default: "https://api.openai.com/v1")
    /// - `OPENAI_MODEL` (default: "gpt-3.5-turbo")
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ModelError::new(ModelErrorKind::MissingApiKey))?;
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            base_url,
            model,
            api_key: Some(api_key),
            timeout: Duration::from_secs(60),
        })
    }

    /// URL of the chat completions resource.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}
