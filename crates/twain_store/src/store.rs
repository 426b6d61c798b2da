//! Store trait definition.

use crate::Subscription;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use twain_core::{NewQuestionGroup, QuestionGroup};
use twain_error::StoreError;

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Secondary collection that write probes land in.
pub const TEST_COLLECTION: &str = "test";

/// Diagnostic document written by [`QuestionGroupStore::write_probe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteProbe {
    /// Always true; marks the document as disposable
    pub test: bool,
    /// When the probe was written
    pub timestamp: DateTime<Utc>,
    /// The user who asked for the probe
    pub user_id: String,
}

impl WriteProbe {
    /// A probe stamped with the current time.
    pub fn now(user_id: impl Into<String>) -> Self {
        Self {
            test: true,
            timestamp: Utc::now(),
            user_id: user_id.into(),
        }
    }
}

/// Persistence and change notification for question groups.
///
/// Backends must deliver full, ordered snapshots: subscribers replace their
/// local view wholesale on every delivery and never patch it.
#[async_trait]
pub trait QuestionGroupStore: Send + Sync {
    /// Persist a new group.
    ///
    /// # Returns
    ///
    /// The identifier the backend assigned.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects or cannot accept the write.
    async fn create(&self, group: NewQuestionGroup) -> StoreResult<String>;

    /// All groups, ascending by `order`.
    ///
    /// Groups sharing an `order` keep creation order.
    async fn list_ordered(&self) -> StoreResult<Vec<QuestionGroup>>;

    /// Open a live feed of ordered snapshots.
    ///
    /// The first delivery is the current snapshot. Every later add, update
    /// or delete produces a fresh full snapshot. An `Err` delivery ends the
    /// feed. Dropping the returned handle releases it.
    async fn subscribe(&self) -> StoreResult<Subscription>;

    /// Overwrite one group's `order`.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if no group has this id.
    async fn update_order(&self, id: &str, order: i64) -> StoreResult<()>;

    /// Remove a group.
    ///
    /// Deleting an id that does not exist succeeds and changes nothing.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Write a diagnostic document to [`TEST_COLLECTION`].
    ///
    /// Used to check that the caller's credential can write at all.
    async fn write_probe(&self, user_id: &str) -> StoreResult<String>;
}

/// Sort a snapshot in display order.
///
/// The sort is stable, so callers that feed groups in creation order get
/// creation order among ties.
pub fn sort_for_display(groups: &mut [QuestionGroup]) {
    groups.sort_by_key(|group| group.order);
}
