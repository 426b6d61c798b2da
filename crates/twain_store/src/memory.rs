//! Process-local store backend.

use crate::{
    QuestionGroupStore, StoreResult, Subscription, WriteProbe, sort_for_display,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::{debug, instrument};
use twain_core::{NewQuestionGroup, QuestionGroup};
use twain_error::{StoreError, StoreErrorKind};
use uuid::Uuid;

#[derive(Debug, Default)]
struct Collections {
    /// Groups in creation order
    groups: Vec<QuestionGroup>,
    /// Write probes, keyed by id
    probes: Vec<(String, WriteProbe)>,
}

/// In-memory [`QuestionGroupStore`].
///
/// Cloning shares the underlying collections, so one clone can be handed to
/// the server and another to a dashboard in the same process.
///
/// Snapshots are published through a `watch` channel. Mutations that land
/// faster than a subscriber reads coalesce into the latest snapshot.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    collections: Arc<RwLock<Collections>>,
    snapshots: Arc<watch::Sender<Vec<QuestionGroup>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            collections: Arc::new(RwLock::new(Collections::default())),
            snapshots: Arc::new(tx),
        }
    }

    /// Probes written so far, oldest first.
    pub async fn probes(&self) -> Vec<WriteProbe> {
        let collections = self.collections.read().await;
        collections.probes.iter().map(|(_, probe)| probe.clone()).collect()
    }

    fn ordered(groups: &[QuestionGroup]) -> Vec<QuestionGroup> {
        let mut snapshot = groups.to_vec();
        sort_for_display(&mut snapshot);
        snapshot
    }

    fn publish(&self, collections: &Collections) {
        self.snapshots.send_replace(Self::ordered(&collections.groups));
    }

    fn not_found(id: &str) -> StoreError {
        StoreError::new(StoreErrorKind::NotFound(format!("questionGroups/{}", id)))
    }
}

#[async_trait]
impl QuestionGroupStore for InMemoryStore {
    #[instrument(skip(self, group), fields(order = group.order))]
    async fn create(&self, group: NewQuestionGroup) -> StoreResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.write().await;
        collections.groups.push(group.with_id(id.clone()));
        self.publish(&collections);
        debug!(group_id = %id, "Created question group");
        Ok(id)
    }

    async fn list_ordered(&self) -> StoreResult<Vec<QuestionGroup>> {
        let collections = self.collections.read().await;
        Ok(Self::ordered(&collections.groups))
    }

    async fn subscribe(&self) -> StoreResult<Subscription> {
        let mut rx = self.snapshots.subscribe();
        Ok(Subscription::spawn(|tx| async move {
            loop {
                let snapshot = rx.borrow_and_update().clone();
                if tx.send(Ok(snapshot)).await.is_err() {
                    break;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }))
    }

    #[instrument(skip(self))]
    async fn update_order(&self, id: &str, order: i64) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let group = collections
            .groups
            .iter_mut()
            .find(|group| group.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        group.order = order;
        self.publish(&collections);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let before = collections.groups.len();
        collections.groups.retain(|group| group.id != id);
        if collections.groups.len() == before {
            debug!(group_id = %id, "Delete of unknown group ignored");
            return Ok(());
        }
        self.publish(&collections);
        debug!(group_id = %id, "Deleted question group");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn write_probe(&self, user_id: &str) -> StoreResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.write().await;
        collections.probes.push((id.clone(), WriteProbe::now(user_id)));
        Ok(id)
    }
}
