//! The headless dashboard controller.

use crate::{
    AuthSession, ConnectionMachine, ConnectionState, GenerationClient, ReorderReport,
    RetryDecision, RetryPolicy, array_move,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use twain_core::QuestionGroup;
use twain_error::{StoreError, StoreErrorKind, TwainResult};
use twain_store::{QuestionGroupStore, StoreResult};

/// What a dashboard renders: connection status plus the ordered groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// Live connection status
    pub state: ConnectionState,
    /// Groups in display order
    pub groups: Vec<QuestionGroup>,
}

/// Drives the live view and the curation actions.
///
/// Every change to the view is published on a `watch` channel; call
/// [`Dashboard::watch`] to follow it.
pub struct Dashboard {
    store: Arc<dyn QuestionGroupStore>,
    session: AuthSession,
    generator: GenerationClient,
    policy: RetryPolicy,
    view: Arc<watch::Sender<DashboardView>>,
    live: Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("session", &self.session)
            .field("generator", &self.generator)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Assemble a dashboard from its injected services. Starts idle.
    pub fn new(
        store: Arc<dyn QuestionGroupStore>,
        session: AuthSession,
        generator: GenerationClient,
        policy: RetryPolicy,
    ) -> Self {
        let (view, _rx) = watch::channel(DashboardView::default());
        Self {
            store,
            session,
            generator,
            policy,
            view: Arc::new(view),
            live: Mutex::new(None),
        }
    }

    /// Follow view changes.
    pub fn watch(&self) -> watch::Receiver<DashboardView> {
        self.view.subscribe()
    }

    /// The current view.
    pub fn view(&self) -> DashboardView {
        self.view.borrow().clone()
    }

    /// The signed-in session.
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Start the live loop, replacing any loop already running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(&self) {
        let task = tokio::spawn(run_live(
            Arc::clone(&self.store),
            self.session.clone(),
            Arc::clone(&self.view),
            ConnectionMachine::new(self.policy),
        ));
        if let Some(previous) = self.live_handle().replace(task) {
            previous.abort();
        }
    }

    /// Stop the live loop. Pending subscriptions and retry timers go with it.
    pub fn disconnect(&self) {
        if let Some(task) = self.live_handle().take() {
            task.abort();
        }
        set_state(&self.view, ConnectionState::Idle);
    }

    /// The "try again" action: fresh retry budget, fresh connection.
    pub fn retry(&self) {
        self.disconnect();
        self.connect();
    }

    /// Move the group at `from` to `to` and persist the new sequence.
    ///
    /// The moved view is published before any write. Each group then gets
    /// `order = index`, one write at a time; a failed write is logged and
    /// skipped. Nothing is reverted.
    #[instrument(skip(self))]
    pub async fn reorder(&self, from: usize, to: usize) -> ReorderReport {
        let mut sequence = Vec::new();
        self.view.send_if_modified(|view| {
            if !array_move(&mut view.groups, from, to) {
                return false;
            }
            for (index, group) in view.groups.iter_mut().enumerate() {
                group.order = index as i64;
            }
            sequence = view.groups.iter().map(|group| group.id.clone()).collect();
            true
        });

        if sequence.is_empty() {
            debug!("Reorder is a no-op");
            return ReorderReport::default();
        }
        self.persist_sequence(&sequence).await
    }

    /// Drag-end: move `active` to where `over` currently sits.
    pub async fn reorder_by_id(&self, active: &str, over: &str) -> ReorderReport {
        let positions = {
            let view = self.view.borrow();
            let find = |id: &str| view.groups.iter().position(|group| group.id == id);
            find(active).zip(find(over))
        };
        match positions {
            Some((from, to)) => self.reorder(from, to).await,
            None => {
                debug!(active, over, "Drag ended outside known groups");
                ReorderReport::default()
            }
        }
    }

    async fn persist_sequence(&self, sequence: &[String]) -> ReorderReport {
        let mut report = ReorderReport::default();
        for (index, id) in sequence.iter().enumerate() {
            report.attempted += 1;
            if let Err(e) = self.store.update_order(id, index as i64).await {
                warn!(group_id = %id, order = index, error = %e, "Failed to persist order");
                report.failed.push(id.clone());
            }
        }
        if report.is_complete() {
            info!(count = report.attempted, "Order persisted");
        } else {
            warn!(
                attempted = report.attempted,
                failed = report.failed.len(),
                "Order partially persisted"
            );
        }
        report
    }

    /// Ask the service for one new group.
    ///
    /// The group also arrives through the live feed.
    #[instrument(skip(self))]
    pub async fn generate(&self) -> TwainResult<QuestionGroup> {
        let token = self.session.get_token(false).await?;
        let group = self.generator.generate(&token).await?;
        info!(group_id = %group.id, "Question group generated");
        Ok(group)
    }

    /// Ask the service for up to `count` new groups.
    #[instrument(skip(self))]
    pub async fn generate_batch(&self, count: usize) -> TwainResult<Vec<QuestionGroup>> {
        let token = self.session.get_token(false).await?;
        let groups = self.generator.generate_batch(&token, count).await?;
        info!(requested = count, produced = groups.len(), "Batch generated");
        Ok(groups)
    }

    /// Remove a group.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.delete(id).await.inspect_err(|e| {
            error!(group_id = %id, error = %e, "Failed to delete question group");
        })
    }

    /// Check the credential can write by storing a probe document.
    #[instrument(skip(self))]
    pub async fn test_write(&self) -> StoreResult<String> {
        match self.store.write_probe(self.session.user_id()).await {
            Ok(id) => {
                info!(probe_id = %id, "Test write succeeded");
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "Test write failed");
                Err(e)
            }
        }
    }

    /// Record that a video was requested for a group.
    pub fn request_video(&self, id: &str) {
        info!(group_id = %id, "Video generation requested");
    }

    fn live_handle(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.live.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let live = self
            .live
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(task) = live.take() {
            task.abort();
        }
    }
}

fn set_state(view: &watch::Sender<DashboardView>, state: ConnectionState) {
    view.send_if_modified(|current| {
        if current.state == state {
            return false;
        }
        current.state = state;
        true
    });
}

/// Token refresh, subscribe, apply snapshots; on failure back off and go
/// around again until the machine gives up.
async fn run_live(
    store: Arc<dyn QuestionGroupStore>,
    session: AuthSession,
    view: Arc<watch::Sender<DashboardView>>,
    mut machine: ConnectionMachine,
) {
    loop {
        set_state(&view, machine.on_token_refresh().clone());
        if let Err(e) = session.get_token(true).await {
            error!(error = %e, "Could not refresh token");
            set_state(&view, machine.on_token_failure().clone());
            return;
        }

        set_state(&view, machine.on_subscribing().clone());
        let failure = match store.subscribe().await {
            Ok(mut subscription) => loop {
                match subscription.next().await {
                    Some(Ok(groups)) => {
                        let state = machine.on_snapshot().clone();
                        debug!(count = groups.len(), "Snapshot applied");
                        view.send_modify(|current| {
                            current.state = state;
                            current.groups = groups;
                        });
                    }
                    Some(Err(e)) => break e,
                    None => {
                        break StoreError::new(StoreErrorKind::Unavailable(
                            "snapshot feed closed".to_string(),
                        ));
                    }
                }
            },
            Err(e) => e,
        };

        match machine.on_store_error(&failure) {
            RetryDecision::Retry { attempt, delay } => {
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %failure,
                    "Live feed failed, retrying"
                );
                set_state(&view, machine.state().clone());
                tokio::time::sleep(delay).await;
            }
            RetryDecision::GiveUp(message) => {
                error!(error = %failure, message = %message, "Live feed stopped");
                set_state(&view, machine.state().clone());
                return;
            }
        }
    }
}
