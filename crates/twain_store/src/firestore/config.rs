//! Connection settings for the Firestore REST backend.

use derive_getters::Getters;
use std::time::Duration;
use twain_error::BuilderError;

/// Default Firestore REST endpoint.
pub const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Configuration for [`crate::FirestoreStore`].
///
/// # Examples
///
/// ```
/// use twain_store::FirestoreConfigBuilder;
///
/// let config = FirestoreConfigBuilder::default()
///     .project_id("twain-prod")
///     .build()
///     .unwrap();
/// assert_eq!(
///     config.documents_url(),
///     "https://firestore.googleapis.com/v1/projects/twain-prod/databases/(default)/documents"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate", error = "BuilderError"))]
pub struct FirestoreConfig {
    /// Google Cloud project
    project_id: String,
    /// Database id
    #[builder(default = "\"(default)\".to_string()")]
    database: String,
    /// OAuth access token or Firebase ID token sent as a bearer credential
    #[builder(default)]
    access_token: Option<String>,
    /// REST endpoint, overridable for the emulator
    #[builder(default = "FIRESTORE_BASE_URL.to_string()")]
    base_url: String,
    /// How often a subscription re-reads the collection
    #[builder(default = "Duration::from_secs(2)")]
    poll_interval: Duration,
    /// Per-request timeout
    #[builder(default = "Duration::from_secs(10)")]
    timeout: Duration,
}

impl FirestoreConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match &self.project_id {
            Some(project) if project.trim().is_empty() => {
                Err("project_id must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl FirestoreConfig {
    /// Root of the document tree.
    pub fn documents_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.database
        )
    }

    /// URL of a collection.
    pub fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}", self.documents_url(), collection)
    }

    /// URL of a single document.
    pub fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_url(), collection, id)
    }
}
