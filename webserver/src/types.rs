//! Wire DTOs for the REST API
//!
//! Request and response bodies use camelCase field names; statuses and
//! content types travel as SCREAMING_SNAKE_CASE strings. These are the
//! shapes the editor client sends and expects back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared::{
    BatchContext, BatchId, BatchStatus, BusinessProfile, ContentBatch, ContentItem, ContentType, DraftItem,
    GenerationOptions, ItemId, ItemStatus, StyleOptions,
};

/// `POST /api/items` body: the client's full working set
#[derive(Debug, Deserialize)]
pub struct SyncItemsRequest {
    pub items: Vec<ItemRow>,
}

/// One row of the client's item table
///
/// The client posts back every row it holds, including generated ones;
/// only rows still in DRAFT participate in the sync. A row without a
/// status counts as a draft.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    #[serde(default)]
    pub id: Option<ItemId>,
    pub title: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub service_area: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
    #[serde(default)]
    pub geolocation: Option<String>,
    #[serde(default)]
    pub target_keywords: Option<String>,
    #[serde(default = "default_include_cta")]
    pub include_cta: bool,
    #[serde(default)]
    pub status: Option<ItemStatus>,
}

fn default_include_cta() -> bool {
    true
}

impl ItemRow {
    pub fn is_draft(&self) -> bool {
        matches!(self.status, None | Some(ItemStatus::Draft))
    }

    pub fn into_draft(self) -> DraftItem {
        DraftItem {
            id: self.id,
            title: self.title,
            content_type: self.content_type,
            service_area: self.service_area,
            target_audience: self.target_audience,
            geolocation: self.geolocation,
            target_keywords: self.target_keywords,
            include_cta: self.include_cta,
        }
    }
}

/// `DELETE /api/items` body
#[derive(Debug, Deserialize)]
pub struct DeleteItemsRequest {
    pub ids: Vec<ItemId>,
}

/// `POST /api/generate` body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    pub item_ids: Vec<ItemId>,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub word_count: Option<u32>,
    #[serde(default)]
    pub template_prompt: Option<String>,
    #[serde(default)]
    pub example_content: Option<String>,
    #[serde(default)]
    pub custom_prompt_instruction: Option<String>,
    #[serde(default)]
    pub business: Option<BusinessProfile>,
    #[serde(default)]
    pub internal_links: Vec<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl GenerateRequest {
    /// Fold the request's prompt inputs into the context persisted on the
    /// batch
    pub fn context(&self) -> BatchContext {
        BatchContext {
            business: self.business.clone().unwrap_or_default(),
            internal_links: self.internal_links.clone(),
            style: StyleOptions {
                template: self.template_prompt.clone(),
                example_content: self.example_content.clone(),
                custom_instruction: self.custom_prompt_instruction.clone(),
            },
            word_count: self.word_count,
            options: GenerationOptions {
                max_tokens: self.max_tokens,
                temperature: self.temperature,
            },
        }
    }
}

/// `POST /api/retry` body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryRequest {
    #[serde(default)]
    pub batch_id: Option<BatchId>,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// `POST /api/topics/suggest` body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestTopicsRequest {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub company_type: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub topic_direction: Option<String>,
    #[serde(default)]
    pub existing_topics: Vec<String>,
}

/// One batch in the `GET /api/batches` history listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub id: BatchId,
    pub status: BatchStatus,
    pub total_items: u32,
    pub completed_items: u32,
    pub failed_items: u32,
    pub created_at: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub items: Vec<ItemBrief>,
}

impl BatchSummary {
    pub fn new(batch: ContentBatch, items: &[ContentItem]) -> Self {
        Self {
            id: batch.id,
            status: batch.status,
            total_items: batch.total_items,
            completed_items: batch.completed_items,
            failed_items: batch.failed_items,
            created_at: batch.created_at,
            started_at: batch.started_at,
            completed_at: batch.completed_at,
            items: items.iter().map(ItemBrief::from).collect(),
        }
    }
}

/// Per-item digest inside a batch summary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBrief {
    pub id: ItemId,
    pub title: String,
    pub status: ItemStatus,
    pub error_message: Option<String>,
    pub doc_url: Option<String>,
}

impl From<&ContentItem> for ItemBrief {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            status: item.status.clone(),
            error_message: item.error_message.clone(),
            doc_url: item.doc_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generate_request_wire_names() {
        let body = json!({
            "itemIds": [],
            "provider": "anthropic",
            "wordCount": 1200,
            "templatePrompt": "local-seo",
            "customPromptInstruction": "Keep it punchy",
            "business": {"name": "Acme Plumbing", "phone": "555-0100"},
            "internalLinks": ["https://acme.example/services"],
            "maxTokens": 3000,
            "temperature": 0.4
        });
        let request: GenerateRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.provider, "anthropic");

        let context = request.context();
        assert_eq!(context.word_count, Some(1200));
        assert_eq!(context.style.template.as_deref(), Some("local-seo"));
        assert_eq!(context.style.custom_instruction.as_deref(), Some("Keep it punchy"));
        assert_eq!(context.business.name.as_deref(), Some("Acme Plumbing"));
        assert_eq!(context.internal_links, vec!["https://acme.example/services"]);
        assert_eq!(context.options.max_tokens, Some(3000));
        assert_eq!(context.options.temperature, Some(0.4));
    }

    #[test]
    fn test_item_row_draft_filter() {
        let draft: ItemRow =
            serde_json::from_value(json!({"title": "Drain Care", "contentType": "BLOG_POST"})).unwrap();
        assert!(draft.is_draft());
        assert!(draft.include_cta);

        let finished: ItemRow = serde_json::from_value(json!({
            "title": "Drain Care",
            "contentType": "BLOG_POST",
            "status": "COMPLETED"
        }))
        .unwrap();
        assert!(!finished.is_draft());
    }

    #[test]
    fn test_batch_summary_shape() {
        let batch = ContentBatch::open(2, BatchContext::default(), Utc::now());
        let summary = BatchSummary::new(batch, &[]);
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["status"], "PROCESSING");
        assert_eq!(value["totalItems"], 2);
        assert!(value["completedAt"].is_null());
        assert!(value["items"].as_array().unwrap().is_empty());
    }
}
