//! HTTP service for Twain question-group generation.
//!
//! The router exposes the generation endpoints behind bearer-token
//! authentication, plus health and diagnostic endpoints:
//!
//! | Route | Method | Auth |
//! |---|---|---|
//! | `/healthCheck` | GET | no |
//! | `/testConfig` | GET | no |
//! | `/listVideos` | GET | yes |
//! | `/generateQuestionGroup` | POST | yes |
//! | `/generateBatchQuestions` | POST | yes |
//! | `/processVideo` | POST | no |
//! | `/generateContent` | POST | no |
//!
//! Services are built once (see [`AppState::from_config`]) and injected.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod pipeline;
mod routes;
mod serve;
mod services;
mod state;

pub use auth::{
    FirebaseIdentityVerifier, IDENTITY_TOOLKIT_URL, IdentityVerifier, StaticTokenVerifier,
    VerifiedUser, bearer_token,
};
pub use config::{
    AuthMode, AuthSettings, DashboardSettings, OpenAiSettings, ServerSettings, StorageSettings,
    StoreBackend, StoreSettings, TwainConfig,
};
pub use pipeline::{GenerationPipeline, GenerationStage};
pub use routes::{BatchRequest, DEFAULT_BATCH_COUNT, GENERATION_FAILED_MESSAGE, router};
pub use serve::serve;
pub use services::{build_catalog, build_driver, build_store, build_verifier};
pub use state::{AppState, ServiceInfo};
