//! Headless dashboard for curating question groups.
//!
//! A [`Dashboard`] keeps a live, ordered view of the store, recovers from
//! transient feed failures with exponential backoff, and persists
//! drag-and-drop reorders.
//!
//! ```no_run
//! use std::sync::Arc;
//! use twain_dashboard::{AuthSession, Dashboard, GenerationClient, RetryPolicy, StaticTokenSource};
//! use twain_store::InMemoryStore;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = AuthSession::new("curator", Arc::new(StaticTokenSource::new("token")));
//! let dashboard = Dashboard::new(
//!     Arc::new(InMemoryStore::new()),
//!     session,
//!     GenerationClient::new("http://127.0.0.1:8080")?,
//!     RetryPolicy::default(),
//! );
//! dashboard.connect();
//! let mut view = dashboard.watch();
//! view.changed().await?;
//! println!("{}", view.borrow().state);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod dashboard;
mod machine;
mod reorder;
mod session;

pub use client::GenerationClient;
pub use dashboard::{Dashboard, DashboardView};
pub use machine::{
    AUTH_ERROR_MESSAGE, ConnectionMachine, ConnectionState, RETRIES_EXHAUSTED_MESSAGE,
    RetryDecision, RetryPolicy, TOKEN_FAILURE_MESSAGE,
};
pub use reorder::{ReorderReport, array_move};
pub use session::{AuthSession, StaticTokenSource, TokenSource};
