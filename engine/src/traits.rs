//! Engine trait definitions for dependency injection

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::types::{GenerationRequest, GenerationResponse};
use shared::{
    BatchId, BatchStatus, ContentBatch, ContentItem, DraftItem, ExportedDoc, ItemId, ProviderFailure, ProviderId,
};

/// A single LLM backend able to produce one completion per request
///
/// Adapters never retry internally and never return empty content; an
/// empty completion from the backend is reported as a failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Generator: Send + Sync {
    /// Which provider this adapter talks to
    fn provider(&self) -> ProviderId;

    /// Request one completion
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderFailure>;
}

/// Persistence seam for items and batches
///
/// Multi-row transitions (`enroll_items`, `requeue_failed_items`) and the
/// counter increments are atomic with respect to concurrent callers; the
/// pipeline never does read-modify-write on aggregate counters itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Replace the DRAFT working set with the given rows
    ///
    /// DRAFT items absent from `drafts` are deleted and incoming rows are
    /// upserted as DRAFT, preserving client-supplied ids. Items in other
    /// statuses are never deleted here. Returns the full item list after
    /// the sync, oldest first.
    async fn sync_draft_items(&self, drafts: Vec<DraftItem>) -> EngineResult<Vec<ContentItem>>;

    /// All items, oldest first
    async fn list_items(&self) -> EngineResult<Vec<ContentItem>>;

    /// Look up one item
    async fn get_item(&self, id: &ItemId) -> EngineResult<Option<ContentItem>>;

    /// Delete the given items, skipping any that are not DRAFT; returns
    /// the number actually deleted
    async fn delete_draft_items(&self, ids: Vec<ItemId>) -> EngineResult<usize>;

    /// Persist a new batch record
    async fn create_batch(&self, batch: ContentBatch) -> EngineResult<()>;

    /// Look up one batch
    async fn get_batch(&self, id: &BatchId) -> EngineResult<Option<ContentBatch>>;

    /// Remove a batch record (enrollment roll-back only)
    async fn delete_batch(&self, id: &BatchId) -> EngineResult<()>;

    /// Newest batches first, capped at `limit`
    async fn list_batches(&self, limit: usize) -> EngineResult<Vec<ContentBatch>>;

    /// Items enrolled in the given batch, oldest first
    async fn items_for_batch(&self, id: &BatchId) -> EngineResult<Vec<ContentItem>>;

    /// Move every listed item to QUEUED and associate it with the batch
    ///
    /// All-or-none: if any id is unknown, no item is modified and the
    /// call fails.
    async fn enroll_items(&self, ids: &[ItemId], batch_id: &BatchId) -> EngineResult<()>;

    /// Move an item to GENERATING
    async fn mark_generating(&self, id: &ItemId) -> EngineResult<()>;

    /// Persist generated content and move the item to COMPLETED
    async fn complete_item(&self, id: &ItemId, content: String, doc: Option<ExportedDoc>) -> EngineResult<()>;

    /// Persist the failure message, bump the item's retry counter, and
    /// move the item to FAILED
    async fn fail_item(&self, id: &ItemId, error: String) -> EngineResult<()>;

    /// Atomically add one to the batch's completed counter
    async fn increment_completed(&self, id: &BatchId) -> EngineResult<()>;

    /// Atomically add one to the batch's failed counter
    async fn increment_failed(&self, id: &BatchId) -> EngineResult<()>;

    /// Set the batch's terminal status and completion timestamp
    async fn finalize_batch(&self, id: &BatchId, status: BatchStatus) -> EngineResult<()>;

    /// Atomically move every FAILED item of the batch back to QUEUED,
    /// clearing its error message but keeping its retry counter; returns
    /// the ids that were reset
    async fn requeue_failed_items(&self, id: &BatchId) -> EngineResult<Vec<ItemId>>;

    /// Reset batch aggregates for a retry round: failed counter to zero,
    /// status back to PROCESSING, completion timestamp cleared; the
    /// completed counter is preserved
    async fn reopen_batch(&self, id: &BatchId) -> EngineResult<()>;
}

/// Best-effort export of finished content to an external document
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocExporter: Send + Sync {
    /// Create an external document holding the rendered HTML
    async fn export(&self, title: &str, html: &str) -> EngineResult<ExportedDoc>;
}
