//! Progress observation: one-off snapshots and a polling follow stream

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::traits::ContentStore;
use shared::{BatchId, BatchProgress};

/// Events emitted while following a batch
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Snapshot(BatchProgress),
    NotFound { batch_id: BatchId },
}

/// Read-only progress observer over the store
///
/// Purely observational: dropping a follow stream stops its polling task
/// and nothing else.
pub struct ProgressNotifier<S> {
    store: Arc<S>,
    poll_interval: Duration,
}

impl<S: ContentStore + 'static> ProgressNotifier<S> {
    pub fn new(store: Arc<S>, poll_interval: Duration) -> Self {
        Self { store, poll_interval }
    }

    /// One-off progress snapshot
    pub async fn snapshot(&self, batch_id: &BatchId) -> EngineResult<BatchProgress> {
        let batch = self
            .store
            .get_batch(batch_id)
            .await?
            .ok_or_else(|| EngineError::batch_not_found(batch_id))?;
        Ok(batch.progress())
    }

    /// Follow a batch until it reaches a terminal status
    ///
    /// Emits a snapshot immediately, then one per poll tick, then the
    /// terminal snapshot, and closes the channel. An unknown batch id
    /// yields exactly one `NotFound` event before the channel closes, so
    /// consumers never hang on a bad id.
    pub fn follow(&self, batch_id: BatchId) -> mpsc::Receiver<ProgressEvent> {
        let (tx, rx) = mpsc::channel(16);
        let store = Arc::clone(&self.store);
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(poll_interval);
            loop {
                ticker.tick().await;
                match store.get_batch(&batch_id).await {
                    Ok(Some(batch)) => {
                        let terminal = batch.status.is_terminal();
                        if tx.send(ProgressEvent::Snapshot(batch.progress())).await.is_err() {
                            // Consumer disconnected; stop polling.
                            break;
                        }
                        if terminal {
                            break;
                        }
                    }
                    Ok(None) => {
                        let _ = tx.send(ProgressEvent::NotFound { batch_id: batch_id.clone() }).await;
                        break;
                    }
                    Err(e) => {
                        warn!("⚠️ Progress poll for batch {batch_id} failed: {e}");
                        break;
                    }
                }
            }
        });

        rx
    }
}
