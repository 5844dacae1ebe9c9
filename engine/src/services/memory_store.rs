//! In-memory content store
//!
//! Items and batches live in maps behind async RwLocks. Every multi-row
//! transition runs under a single write lock, which is what makes the
//! all-or-none and counter guarantees of the store contract hold.

use std::collections::HashMap;
use std::collections::HashSet;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use shared::{
    BatchId, BatchStatus, ContentBatch, ContentItem, DraftItem, ExportedDoc, ItemId, ItemStatus,
};

use crate::error::{EngineError, EngineResult};
use crate::traits::ContentStore;

/// Store implementation backed by process memory
pub struct InMemoryStore {
    items: RwLock<HashMap<ItemId, ContentItem>>,
    batches: RwLock<HashMap<BatchId, ContentBatch>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            batches: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Oldest first; ids break timestamp ties so the order is stable
fn sort_items(items: &mut [ContentItem]) {
    items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
}

#[async_trait]
impl ContentStore for InMemoryStore {
    async fn sync_draft_items(&self, drafts: Vec<DraftItem>) -> EngineResult<Vec<ContentItem>> {
        let now = Utc::now();
        {
            let mut items = self.items.write().await;

            // Drafts the client no longer sends are gone; everything the
            // pipeline owns stays
            let keep: HashSet<ItemId> = drafts.iter().filter_map(|draft| draft.id.clone()).collect();
            items.retain(|id, item| item.status != ItemStatus::Draft || keep.contains(id));

            for mut draft in drafts {
                let id = draft.id.clone().unwrap_or_else(ItemId::new);
                draft.id = Some(id.clone());
                match items.entry(id) {
                    Entry::Occupied(mut slot) => {
                        let item = slot.get_mut();
                        item.title = draft.title;
                        item.content_type = draft.content_type;
                        item.service_area = draft.service_area;
                        item.target_audience = draft.target_audience;
                        item.geolocation = draft.geolocation;
                        item.target_keywords = draft.target_keywords;
                        item.include_cta = draft.include_cta;
                        item.status = ItemStatus::Draft;
                        item.updated_at = now;
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(ContentItem::from_draft(draft, now));
                    }
                }
            }
        }
        self.list_items().await
    }

    async fn list_items(&self) -> EngineResult<Vec<ContentItem>> {
        let items = self.items.read().await;
        let mut all: Vec<ContentItem> = items.values().cloned().collect();
        sort_items(&mut all);
        Ok(all)
    }

    async fn get_item(&self, id: &ItemId) -> EngineResult<Option<ContentItem>> {
        let items = self.items.read().await;
        Ok(items.get(id).cloned())
    }

    async fn delete_draft_items(&self, ids: Vec<ItemId>) -> EngineResult<usize> {
        let mut items = self.items.write().await;
        let mut deleted = 0;
        for id in &ids {
            if items.get(id).is_some_and(|item| item.status == ItemStatus::Draft) {
                items.remove(id);
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn create_batch(&self, batch: ContentBatch) -> EngineResult<()> {
        let mut batches = self.batches.write().await;
        batches.insert(batch.id.clone(), batch);
        Ok(())
    }

    async fn get_batch(&self, id: &BatchId) -> EngineResult<Option<ContentBatch>> {
        let batches = self.batches.read().await;
        Ok(batches.get(id).cloned())
    }

    async fn delete_batch(&self, id: &BatchId) -> EngineResult<()> {
        let mut batches = self.batches.write().await;
        batches.remove(id);
        Ok(())
    }

    async fn list_batches(&self, limit: usize) -> EngineResult<Vec<ContentBatch>> {
        let batches = self.batches.read().await;
        let mut all: Vec<ContentBatch> = batches.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        all.truncate(limit);
        Ok(all)
    }

    async fn items_for_batch(&self, id: &BatchId) -> EngineResult<Vec<ContentItem>> {
        let items = self.items.read().await;
        let mut enrolled: Vec<ContentItem> = items
            .values()
            .filter(|item| item.batch_id.as_ref() == Some(id))
            .cloned()
            .collect();
        sort_items(&mut enrolled);
        Ok(enrolled)
    }

    async fn enroll_items(&self, ids: &[ItemId], batch_id: &BatchId) -> EngineResult<()> {
        let mut items = self.items.write().await;

        // Validate every id before touching anything
        for id in ids {
            if !items.contains_key(id) {
                return Err(EngineError::item_not_found(id));
            }
        }

        let now = Utc::now();
        for id in ids {
            if let Some(item) = items.get_mut(id) {
                item.status = ItemStatus::Queued;
                item.batch_id = Some(batch_id.clone());
                item.updated_at = now;
            }
        }
        Ok(())
    }

    async fn mark_generating(&self, id: &ItemId) -> EngineResult<()> {
        let mut items = self.items.write().await;
        let item = items.get_mut(id).ok_or_else(|| EngineError::item_not_found(id))?;
        item.status = ItemStatus::Generating;
        item.updated_at = Utc::now();
        Ok(())
    }

    async fn complete_item(&self, id: &ItemId, content: String, doc: Option<ExportedDoc>) -> EngineResult<()> {
        let mut items = self.items.write().await;
        let item = items.get_mut(id).ok_or_else(|| EngineError::item_not_found(id))?;
        item.status = ItemStatus::Completed;
        item.generated_content = Some(content);
        item.error_message = None;
        if let Some(doc) = doc {
            item.doc_id = Some(doc.doc_id);
            item.doc_url = Some(doc.doc_url);
        }
        item.updated_at = Utc::now();
        Ok(())
    }

    async fn fail_item(&self, id: &ItemId, error: String) -> EngineResult<()> {
        let mut items = self.items.write().await;
        let item = items.get_mut(id).ok_or_else(|| EngineError::item_not_found(id))?;
        item.status = ItemStatus::Failed;
        item.error_message = Some(error);
        item.retry_count += 1;
        item.updated_at = Utc::now();
        Ok(())
    }

    async fn increment_completed(&self, id: &BatchId) -> EngineResult<()> {
        let mut batches = self.batches.write().await;
        let batch = batches.get_mut(id).ok_or_else(|| EngineError::batch_not_found(id))?;
        batch.completed_items += 1;
        Ok(())
    }

    async fn increment_failed(&self, id: &BatchId) -> EngineResult<()> {
        let mut batches = self.batches.write().await;
        let batch = batches.get_mut(id).ok_or_else(|| EngineError::batch_not_found(id))?;
        batch.failed_items += 1;
        Ok(())
    }

    async fn finalize_batch(&self, id: &BatchId, status: BatchStatus) -> EngineResult<()> {
        let mut batches = self.batches.write().await;
        let batch = batches.get_mut(id).ok_or_else(|| EngineError::batch_not_found(id))?;
        batch.status = status;
        batch.completed_at = Some(Utc::now());
        Ok(())
    }

    async fn requeue_failed_items(&self, id: &BatchId) -> EngineResult<Vec<ItemId>> {
        let mut items = self.items.write().await;
        let now = Utc::now();
        let mut reset: Vec<(DateTime<Utc>, ItemId)> = Vec::new();
        for item in items.values_mut() {
            if item.batch_id.as_ref() == Some(id) && item.status == ItemStatus::Failed {
                item.status = ItemStatus::Queued;
                item.error_message = None;
                item.updated_at = now;
                reset.push((item.created_at, item.id.clone()));
            }
        }
        reset.sort();
        Ok(reset.into_iter().map(|(_, item_id)| item_id).collect())
    }

    async fn reopen_batch(&self, id: &BatchId) -> EngineResult<()> {
        let mut batches = self.batches.write().await;
        let batch = batches.get_mut(id).ok_or_else(|| EngineError::batch_not_found(id))?;
        batch.failed_items = 0;
        batch.status = BatchStatus::Processing;
        batch.completed_at = None;
        Ok(())
    }
}
