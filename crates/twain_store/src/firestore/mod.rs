//! Cloud Firestore REST backend.

mod client;
mod config;
pub mod value;

pub use client::FirestoreStore;
pub use config::{FIRESTORE_BASE_URL, FirestoreConfig, FirestoreConfigBuilder};
