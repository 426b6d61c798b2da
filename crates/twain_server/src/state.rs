//! Shared handler state.

use crate::{GenerationPipeline, IdentityVerifier, TwainConfig};
use std::sync::Arc;
use twain_store::VideoCatalog;

/// Facts about the deployment reported by the diagnostic endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Label reported by the health check
    pub environment: String,
    /// Upper bound on a batch request's `count`
    pub max_batch_count: usize,
    /// Whether a text-generation key is configured
    pub openai_key_set: bool,
    /// Whether a video bucket is configured
    pub storage_bucket_set: bool,
}

impl ServiceInfo {
    /// Derive from the loaded configuration.
    pub fn from_config(config: &TwainConfig) -> Self {
        Self {
            environment: config.server.environment.clone(),
            max_batch_count: config.server.max_batch_count,
            openai_key_set: config.openai_key_set(),
            storage_bucket_set: config.storage_bucket_set(),
        }
    }
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            max_batch_count: 50,
            openai_key_set: false,
            storage_bucket_set: false,
        }
    }
}

/// Services injected into every handler.
///
/// Everything is immutable and shared; handlers never coordinate with one
/// another through this state.
#[derive(Clone)]
pub struct AppState {
    pub(crate) pipeline: GenerationPipeline,
    pub(crate) verifier: Arc<dyn IdentityVerifier>,
    pub(crate) catalog: Arc<dyn VideoCatalog>,
    pub(crate) info: ServiceInfo,
}

impl AppState {
    /// Bundle the services.
    pub fn new(
        pipeline: GenerationPipeline,
        verifier: Arc<dyn IdentityVerifier>,
        catalog: Arc<dyn VideoCatalog>,
        info: ServiceInfo,
    ) -> Self {
        Self {
            pipeline,
            verifier,
            catalog,
            info,
        }
    }

    /// The generation pipeline.
    pub fn pipeline(&self) -> &GenerationPipeline {
        &self.pipeline
    }
}
