//! Live snapshot feeds.

use crate::StoreResult;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use twain_core::QuestionGroup;

/// One delivery on a feed.
pub type Snapshot = StoreResult<Vec<QuestionGroup>>;

/// Handle on a live feed of ordered snapshots.
///
/// The producing task is aborted when the handle is cancelled or dropped,
/// so a released subscription never delivers again.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::Receiver<Snapshot>,
    task: JoinHandle<()>,
}

impl Subscription {
    /// Spawn a producer and wrap its output channel.
    ///
    /// The producer should return once `send` fails, which happens as soon
    /// as the handle is gone.
    pub fn spawn<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(mpsc::Sender<Snapshot>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let task = tokio::spawn(producer(tx));
        Self { rx, task }
    }

    /// Wait for the next snapshot.
    ///
    /// Returns `None` once the producer has stopped.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }

    /// Release the feed.
    pub fn cancel(self) {
        // Drop does the work.
    }

    /// Whether the producing task has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}
