//! Error types for the Twain question-group service.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! [`TwainError`] boxes any of them for callers that cross crate boundaries.
//!
//! # Examples
//!
//! ```
//! use twain_error::{StoreError, StoreErrorKind, TwainResult};
//!
//! fn load() -> TwainResult<Vec<String>> {
//!     Err(StoreError::new(StoreErrorKind::Unavailable("offline".into())))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod builder;
mod config;
mod error;
mod generation;
mod http;
mod model;
mod server;
mod store;

pub use auth::{AuthError, AuthErrorKind};
pub use builder::{BuilderError, BuilderErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{TwainError, TwainErrorKind, TwainResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use model::{ModelError, ModelErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use store::{RetryableError, StoreError, StoreErrorKind};
