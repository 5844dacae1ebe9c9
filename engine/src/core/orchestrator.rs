//! Batch lifecycle: creation, enrollment, chunked dispatch, finalization

use futures_util::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::{EngineError, EngineResult};
use crate::traits::{ContentStore, DocExporter, Generator};
use crate::types::{PipelineConfig, StartedBatch};
use shared::{BatchContext, BatchId, BatchStatus, ContentBatch, ItemId};

use super::processor::ItemProcessor;

/// Drives batches from enrollment to a terminal status
///
/// Dispatch is bounded fan-out: items run in parallel within a fixed-size
/// group and the next group starts only after the current one drains.
pub struct BatchPipeline<S> {
    pub(crate) store: Arc<S>,
    pub(crate) processor: ItemProcessor<S>,
    pub(crate) config: PipelineConfig,
}

impl<S: ContentStore + 'static> BatchPipeline<S> {
    pub fn new(store: Arc<S>, exporter: Option<Arc<dyn DocExporter>>, config: PipelineConfig) -> Self {
        let processor = ItemProcessor::new(Arc::clone(&store), exporter);
        Self { store, processor, config }
    }

    /// Enroll the items into a new batch and start processing it in the
    /// background
    ///
    /// Returns as soon as every item is enrolled; generation continues on
    /// a spawned task and callers observe it through progress reads. The
    /// enrollment itself is all-or-none: an unknown id fails the call and
    /// leaves no batch behind.
    pub async fn start_batch(
        &self,
        item_ids: Vec<ItemId>,
        adapter: Arc<dyn Generator>,
        context: BatchContext,
    ) -> EngineResult<StartedBatch> {
        if item_ids.is_empty() {
            return Err(EngineError::validation("itemIds must not be empty"));
        }

        let batch = ContentBatch::open(item_ids.len() as u32, context.clone(), chrono::Utc::now());
        let batch_id = batch.id.clone();
        self.store.create_batch(batch).await?;

        if let Err(e) = self.store.enroll_items(&item_ids, &batch_id).await {
            // Roll the empty batch record back so a failed enrollment
            // leaves no half-open batch.
            if let Err(rollback) = self.store.delete_batch(&batch_id).await {
                error!("❌ Failed to roll back batch {batch_id}: {rollback}");
            }
            return Err(e);
        }

        info!(
            "🚀 Batch {batch_id} started: {} items via {}",
            item_ids.len(),
            adapter.provider()
        );
        let handle = self.spawn_run(batch_id.clone(), item_ids, adapter, context);
        Ok(StartedBatch { batch_id, handle })
    }

    /// Run the given ids through the processor in bounded groups, then
    /// finalize the batch from its re-read counters
    pub(crate) fn spawn_run(
        &self,
        batch_id: BatchId,
        item_ids: Vec<ItemId>,
        adapter: Arc<dyn Generator>,
        context: BatchContext,
    ) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let processor = self.processor.clone();
        let chunk_size = self.config.chunk_size.max(1);

        tokio::spawn(async move {
            for group in item_ids.chunks(chunk_size) {
                let round = group
                    .iter()
                    .map(|id| processor.process(id, &batch_id, adapter.as_ref(), &context));
                join_all(round).await;
            }

            match store.get_batch(&batch_id).await {
                Ok(Some(batch)) => {
                    // Zero successes is the only thing that fails a batch;
                    // partial failure still counts as completed.
                    let status = if batch.failed_items == batch.total_items {
                        BatchStatus::Failed
                    } else {
                        BatchStatus::Completed
                    };
                    if let Err(e) = store.finalize_batch(&batch_id, status.clone()).await {
                        error!("❌ Failed to finalize batch {batch_id}: {e}");
                        return;
                    }
                    info!(
                        "✅ Batch {batch_id} finished {status:?}: {} completed, {} failed of {}",
                        batch.completed_items, batch.failed_items, batch.total_items
                    );
                }
                Ok(None) => error!("❌ Batch {batch_id} vanished before finalization"),
                Err(e) => error!("❌ Failed to re-read batch {batch_id}: {e}"),
            }
        })
    }
}
