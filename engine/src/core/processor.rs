//! Per-item generation: the GENERATING -> COMPLETED | FAILED walk

use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

use crate::traits::{ContentStore, DocExporter, Generator};
use crate::types::GenerationRequest;
use shared::{BatchContext, BatchId, ExportedDoc, ItemId, ProviderFailure};

use super::prompt::build_content_prompt;

static FENCE_OPEN: OnceLock<Regex> = OnceLock::new();
static FENCE_CLOSE: OnceLock<Regex> = OnceLock::new();

/// Strip one enclosing markdown code fence, if any
///
/// Backends are prompted for raw markup but some still wrap the output in
/// ```html fences. Normalization happens here for every provider rather
/// than inside each adapter.
pub fn strip_code_fences(raw: &str) -> String {
    let open = FENCE_OPEN.get_or_init(|| Regex::new(r"(?i)^```[a-z]*\n?").unwrap());
    let close = FENCE_CLOSE.get_or_init(|| Regex::new(r"\n?```\s*$").unwrap());

    let stripped = open.replace(raw, "");
    let stripped = close.replace(&stripped, "");
    stripped.trim().to_string()
}

/// Runs one enrolled item through to a terminal status
///
/// Every outcome is persisted by the processor itself: content and
/// COMPLETED on success, the error message and FAILED otherwise, plus
/// exactly one batch counter increment per item. Failures stay local to
/// the item; siblings in the same group are never affected.
pub struct ItemProcessor<S> {
    store: Arc<S>,
    exporter: Option<Arc<dyn DocExporter>>,
}

impl<S> Clone for ItemProcessor<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            exporter: self.exporter.clone(),
        }
    }
}

impl<S: ContentStore> ItemProcessor<S> {
    pub fn new(store: Arc<S>, exporter: Option<Arc<dyn DocExporter>>) -> Self {
        Self { store, exporter }
    }

    /// Generate content for one item and persist the outcome
    pub async fn process(&self, item_id: &ItemId, batch_id: &BatchId, adapter: &dyn Generator, context: &BatchContext) {
        let item = match self.store.get_item(item_id).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                error!("❌ Item {item_id} vanished before processing");
                self.bump_failed(batch_id).await;
                return;
            }
            Err(e) => {
                error!("❌ Failed to load item {item_id}: {e}");
                self.bump_failed(batch_id).await;
                return;
            }
        };

        // Persist GENERATING before the network call so a crash mid-flight
        // leaves an observable in-flight state instead of reverting to QUEUED.
        if let Err(e) = self.store.mark_generating(item_id).await {
            error!("❌ Failed to mark item {item_id} as generating: {e}");
            self.bump_failed(batch_id).await;
            return;
        }

        let request = GenerationRequest {
            prompt: build_content_prompt(&item, context),
            max_tokens: context.options.max_tokens,
            temperature: context.options.temperature,
        };

        let outcome = match adapter.generate(&request).await {
            Ok(response) => {
                let content = strip_code_fences(&response.content);
                if content.is_empty() {
                    Err(ProviderFailure::EmptyCompletion)
                } else {
                    Ok((content, response.tokens_used))
                }
            }
            Err(failure) => Err(failure),
        };

        match outcome {
            Ok((content, tokens_used)) => {
                let doc = self.export_best_effort(&item.title, &content).await;
                if let Err(e) = self.store.complete_item(item_id, content, doc).await {
                    error!("❌ Failed to persist completion for item {item_id}: {e}");
                    self.bump_failed(batch_id).await;
                    return;
                }
                if let Err(e) = self.store.increment_completed(batch_id).await {
                    error!("❌ Failed to bump completed counter for batch {batch_id}: {e}");
                }
                info!("✅ Item {item_id} completed ({} tokens)", tokens_used.unwrap_or(0));
            }
            Err(failure) => {
                warn!("⚠️ Item {item_id} failed: {failure}");
                if let Err(e) = self.store.fail_item(item_id, failure.to_string()).await {
                    error!("❌ Failed to persist failure for item {item_id}: {e}");
                }
                self.bump_failed(batch_id).await;
            }
        }
    }

    async fn export_best_effort(&self, title: &str, html: &str) -> Option<ExportedDoc> {
        let exporter = self.exporter.as_ref()?;
        match exporter.export(title, html).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                // Export failure never fails the item.
                warn!("⚠️ Document export failed for \"{title}\": {e}");
                None
            }
        }
    }

    async fn bump_failed(&self, batch_id: &BatchId) {
        if let Err(e) = self.store.increment_failed(batch_id).await {
            error!("❌ Failed to bump failed counter for batch {batch_id}: {e}");
        }
    }
}
