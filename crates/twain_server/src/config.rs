//! Layered service configuration.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from twain.toml)
//! - `~/.config/twain/twain.toml`
//! - `./twain.toml`
//! - An explicit file passed by the caller
//! - Environment variables `TWAIN__SECTION__KEY`

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument};
use twain_error::{ConfigError, ConfigErrorKind};

const DEFAULT_CONFIG: &str = include_str!("../../../twain.toml");

/// HTTP host settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to listen on
    pub bind: String,
    /// Label reported by the health check
    pub environment: String,
    /// Upper bound on a batch request's `count`
    pub max_batch_count: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            environment: "development".to_string(),
            max_batch_count: 50,
        }
    }
}

/// Text-generation service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    /// API root
    pub base_url: String,
    /// Chat model
    pub model: String,
    /// Bearer key; falls back to `OPENAI_API_KEY`
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: twain_models::DEFAULT_BASE_URL.to_string(),
            model: twain_models::DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

/// Which store backend to construct.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local store
    #[default]
    Memory,
    /// Cloud Firestore REST
    Firestore,
}

/// Document store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Backend selection
    pub backend: StoreBackend,
    /// Firestore project
    pub project_id: Option<String>,
    /// Firestore database id
    pub database: String,
    /// Bearer credential for Firestore
    pub access_token: Option<String>,
    /// Subscription poll interval
    pub poll_interval_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            project_id: None,
            database: "(default)".to_string(),
            access_token: None,
            poll_interval_ms: 2000,
        }
    }
}

/// How bearer credentials are verified.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AuthMode {
    /// Firebase identity service lookup
    Firebase,
    /// Fixed token table
    #[default]
    Static,
}

/// Caller authentication settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Verifier selection
    pub mode: AuthMode,
    /// Web API key for the identity service
    pub firebase_api_key: Option<String>,
    /// Token to user id, for `static` mode
    pub static_tokens: HashMap<String, String>,
}

/// Video bucket settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Bucket name; falls back to `FIREBASE_STORAGE_BUCKET`
    pub bucket: Option<String>,
    /// Object prefix holding queued videos
    pub prefix: String,
    /// Bearer credential for the bucket
    pub access_token: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            bucket: None,
            prefix: twain_core::VIDEO_QUEUE_PREFIX.to_string(),
            access_token: None,
        }
    }
}

/// Client-side dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Base URL of the generation endpoints
    pub endpoint: String,
    /// Retries before the live view gives up
    pub max_retries: u32,
    /// First retry delay; doubles per attempt
    pub base_delay_ms: u64,
    /// User id recorded on write probes
    pub user_id: String,
    /// Bearer token presented to the generation endpoints
    pub token: Option<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080".to_string(),
            max_retries: 3,
            base_delay_ms: 1000,
            user_id: "cli".to_string(),
            token: None,
        }
    }
}

/// Complete Twain configuration.
///
/// # Examples
///
/// ```
/// use twain_server::TwainConfig;
///
/// let config = TwainConfig::from_toml("[server]\nmax_batch_count = 5").unwrap();
/// assert_eq!(config.server.max_batch_count, 5);
/// assert_eq!(config.dashboard.max_retries, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TwainConfig {
    /// `[server]`
    pub server: ServerSettings,
    /// `[openai]`
    pub openai: OpenAiSettings,
    /// `[store]`
    pub store: StoreSettings,
    /// `[auth]`
    pub auth: AuthSettings,
    /// `[storage]`
    pub storage: StorageSettings,
    /// `[dashboard]`
    pub dashboard: DashboardSettings,
}

impl TwainConfig {
    /// Load with the standard precedence.
    ///
    /// `explicit` is an additional required file layered above the
    /// current-directory file and below the environment.
    #[instrument(skip_all)]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration: env > explicit > current dir > home dir > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/twain/twain.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("twain").required(false));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::new(ConfigErrorKind::Missing(
                    path.display().to_string(),
                )));
            }
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TWAIN")
                .prefix_separator("__")
                .separator("__"),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?;
        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;
        Ok(parsed.with_env_fallbacks())
    }

    /// Parse a TOML document over the built-in defaults, without other sources.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Load(e.to_string())))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
    }

    /// Fill unset secrets from the conventional environment variables.
    pub fn with_env_fallbacks(mut self) -> Self {
        if self.openai.api_key.is_none() {
            self.openai.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if self.storage.bucket.is_none() {
            self.storage.bucket = std::env::var("FIREBASE_STORAGE_BUCKET").ok();
        }
        self
    }

    /// Whether a text-generation key is configured.
    pub fn openai_key_set(&self) -> bool {
        self.openai.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    /// Whether a video bucket is configured.
    pub fn storage_bucket_set(&self) -> bool {
        self.storage.bucket.as_deref().is_some_and(|b| !b.is_empty())
    }
}
