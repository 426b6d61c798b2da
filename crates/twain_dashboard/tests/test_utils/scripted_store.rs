//! Store wrapper with injectable failures.

use async_trait::async_trait;
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use twain_core::{NewQuestionGroup, QuestionGroup};
use twain_error::{StoreError, StoreErrorKind};
use twain_store::{InMemoryStore, QuestionGroupStore, StoreResult, Subscription};

/// Delegates to an [`InMemoryStore`] unless told to fail.
///
/// * Queued subscribe failures are consumed one per `subscribe` call; each
///   yields a feed whose only delivery is that error.
/// * `update_order` for a failing id returns `Unavailable` without writing.
/// * A gated store holds every `update_order` until permits are released.
pub struct ScriptedStore {
    inner: InMemoryStore,
    subscribe_failures: Mutex<VecDeque<StoreErrorKind>>,
    subscribe_calls: Mutex<usize>,
    failing_updates: Mutex<HashSet<String>>,
    update_calls: Mutex<Vec<(String, i64)>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedStore {
    pub fn new(inner: InMemoryStore) -> Self {
        Self {
            inner,
            subscribe_failures: Mutex::new(VecDeque::new()),
            subscribe_calls: Mutex::new(0),
            failing_updates: Mutex::new(HashSet::new()),
            update_calls: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Hold `update_order` calls until [`ScriptedStore::release`].
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    pub fn fail_subscribes(self, kinds: Vec<StoreErrorKind>) -> Self {
        self.subscribe_failures.lock().unwrap().extend(kinds);
        self
    }

    pub fn fail_update_for(&self, id: &str) {
        self.failing_updates.lock().unwrap().insert(id.to_string());
    }

    pub fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    pub fn subscribe_calls(&self) -> usize {
        *self.subscribe_calls.lock().unwrap()
    }

    pub fn update_calls(&self) -> Vec<(String, i64)> {
        self.update_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionGroupStore for ScriptedStore {
    async fn create(&self, group: NewQuestionGroup) -> StoreResult<String> {
        self.inner.create(group).await
    }

    async fn list_ordered(&self) -> StoreResult<Vec<QuestionGroup>> {
        self.inner.list_ordered().await
    }

    async fn subscribe(&self) -> StoreResult<Subscription> {
        *self.subscribe_calls.lock().unwrap() += 1;
        let failure = self.subscribe_failures.lock().unwrap().pop_front();
        match failure {
            Some(kind) => Ok(Subscription::spawn(|tx| async move {
                let _ = tx.send(Err(StoreError::new(kind))).await;
            })),
            None => self.inner.subscribe().await,
        }
    }

    async fn update_order(&self, id: &str, order: i64) -> StoreResult<()> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.update_calls
            .lock()
            .unwrap()
            .push((id.to_string(), order));
        if self.failing_updates.lock().unwrap().contains(id) {
            return Err(StoreError::new(StoreErrorKind::Unavailable(
                "write rejected".to_string(),
            )));
        }
        self.inner.update_order(id, order).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.inner.delete(id).await
    }

    async fn write_probe(&self, user_id: &str) -> StoreResult<String> {
        self.inner.write_probe(user_id).await
    }
}
