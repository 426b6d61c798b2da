//! Construct services from configuration.

use crate::{
    AppState, AuthMode, AuthSettings, FirebaseIdentityVerifier, GenerationPipeline,
    IdentityVerifier, OpenAiSettings, ServiceInfo, StaticTokenVerifier, StorageSettings,
    StoreBackend, StoreSettings, TwainConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use twain_error::{ConfigError, ConfigErrorKind, TwainResult};
use twain_models::{CaptionGenerator, ChatConfigBuilder, ChatDriver, OpenAiClient, QuestionGenerator};
use twain_store::{
    BucketConfigBuilder, BucketVideoCatalog, FirestoreConfigBuilder, FirestoreStore, InMemoryStore,
    QuestionGroupStore, StaticVideoCatalog, VideoCatalog,
};

fn missing(key: &str) -> ConfigError {
    ConfigError::new(ConfigErrorKind::Missing(key.to_string()))
}

/// The configured store backend.
pub fn build_store(settings: &StoreSettings) -> TwainResult<Arc<dyn QuestionGroupStore>> {
    info!(backend = %settings.backend, "Opening question group store");
    match settings.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryStore::new())),
        StoreBackend::Firestore => {
            let project_id = settings
                .project_id
                .clone()
                .ok_or_else(|| missing("store.project_id"))?;
            let config = FirestoreConfigBuilder::default()
                .project_id(project_id)
                .database(settings.database.clone())
                .access_token(settings.access_token.clone())
                .poll_interval(Duration::from_millis(settings.poll_interval_ms))
                .build()?;
            Ok(Arc::new(FirestoreStore::new(config)?))
        }
    }
}

/// The configured text-generation client.
pub fn build_driver(settings: &OpenAiSettings) -> TwainResult<Arc<dyn ChatDriver>> {
    let config = ChatConfigBuilder::default()
        .base_url(settings.base_url.clone())
        .model(settings.model.clone())
        .api_key(settings.api_key.clone())
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;
    Ok(Arc::new(OpenAiClient::new(config)?))
}

/// The configured credential verifier.
pub fn build_verifier(settings: &AuthSettings) -> TwainResult<Arc<dyn IdentityVerifier>> {
    match settings.mode {
        AuthMode::Firebase => {
            let key = settings
                .firebase_api_key
                .clone()
                .ok_or_else(|| missing("auth.firebase_api_key"))?;
            Ok(Arc::new(FirebaseIdentityVerifier::new(key)))
        }
        AuthMode::Static => {
            if settings.static_tokens.is_empty() {
                warn!("Static auth with no tokens; every request will be rejected");
            }
            Ok(Arc::new(StaticTokenVerifier::new(
                settings.static_tokens.clone(),
            )))
        }
    }
}

/// The configured video catalog, or an empty one without a bucket.
pub fn build_catalog(settings: &StorageSettings) -> TwainResult<Arc<dyn VideoCatalog>> {
    match &settings.bucket {
        Some(bucket) => {
            let config = BucketConfigBuilder::default()
                .bucket(bucket.clone())
                .prefix(settings.prefix.clone())
                .access_token(settings.access_token.clone())
                .build()?;
            Ok(Arc::new(BucketVideoCatalog::new(config)))
        }
        None => {
            warn!("No storage bucket configured; video listing will be empty");
            Ok(Arc::new(StaticVideoCatalog::default()))
        }
    }
}

impl AppState {
    /// Wire every service from configuration around an existing store.
    pub fn from_config(
        config: &TwainConfig,
        store: Arc<dyn QuestionGroupStore>,
    ) -> TwainResult<Self> {
        let driver = build_driver(&config.openai)?;
        let pipeline = GenerationPipeline::new(
            store,
            QuestionGenerator::new(driver.clone()),
            CaptionGenerator::new(driver),
        );
        Ok(Self::new(
            pipeline,
            build_verifier(&config.auth)?,
            build_catalog(&config.storage)?,
            ServiceInfo::from_config(config),
        ))
    }
}
