//! Failed-subset retry for a finished batch

use std::sync::Arc;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::traits::{ContentStore, Generator};
use crate::types::RetryOutcome;
use shared::BatchId;

use super::orchestrator::BatchPipeline;

impl<S: ContentStore + 'static> BatchPipeline<S> {
    /// Requeue exactly the FAILED items of a batch and run them again
    ///
    /// Completed items and the completed counter are untouched; the reset
    /// items keep their retry counters but lose their error messages. A
    /// batch with nothing to retry is rejected without modifying any
    /// state. The retry round may use a different adapter than the
    /// original round, and rebuilds identical prompts from the context
    /// stored on the batch.
    pub async fn retry_batch(&self, batch_id: &BatchId, adapter: Arc<dyn Generator>) -> EngineResult<RetryOutcome> {
        let batch = self
            .store
            .get_batch(batch_id)
            .await?
            .ok_or_else(|| EngineError::batch_not_found(batch_id))?;

        let reset = self.store.requeue_failed_items(batch_id).await?;
        if reset.is_empty() {
            return Err(EngineError::validation("No failed items to retry"));
        }
        let retried = reset.len();
        self.store.reopen_batch(batch_id).await?;

        info!(
            "🔁 Batch {batch_id} retrying {retried} failed items via {}",
            adapter.provider()
        );
        let handle = self.spawn_run(batch_id.clone(), reset, adapter, batch.context);
        Ok(RetryOutcome {
            batch_id: batch_id.clone(),
            retried,
            handle,
        })
    }
}
