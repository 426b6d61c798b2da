//! Twain: couples' conversation prompts, generated and curated.
//!
//! Twain rolls a theme and difficulty, asks a chat model for five questions
//! and a caption, stores the result as a question group, and lets a curator
//! reorder the stored groups from a live dashboard.
//!
//! # Architecture
//!
//! - `twain_error` - Error types
//! - `twain_core` - Themes, prompt table, question-group records
//! - `twain_models` - Chat client plus question and caption generators
//! - `twain_store` - Store trait, in-memory and Firestore backends, video catalog
//! - `twain_server` - Configuration, authentication and HTTP endpoints
//! - `twain_dashboard` - Live view, retry state machine and reordering
//!
//! This crate re-exports everything for convenience.
//!
//! ```no_run
//! use std::sync::Arc;
//! use twain::{AppState, InMemoryStore, TwainConfig, router, serve};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TwainConfig::load(None)?;
//! let state = AppState::from_config(&config, Arc::new(InMemoryStore::new()))?;
//! serve(&config.server.bind, router(state)).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observability;

pub use observability::{ObservabilityConfig, init_observability};

pub use twain_core::*;
pub use twain_dashboard::*;
pub use twain_error::*;
pub use twain_models::*;
pub use twain_server::*;
pub use twain_store::*;
