//! Core shared types and identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for content items
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for generation batches
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BatchId(Uuid);

impl BatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for BatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for downstream LLM providers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    OpenAI,
    Anthropic,
    Gemini,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderId::OpenAI => write!(f, "openai"),
            ProviderId::Anthropic => write!(f, "anthropic"),
            ProviderId::Gemini => write!(f, "gemini"),
        }
    }
}

impl ProviderId {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(ProviderId::OpenAI),
            "anthropic" => Some(ProviderId::Anthropic),
            "gemini" => Some(ProviderId::Gemini),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Gemini => "gemini",
        }
    }
}

/// Kind of page a content item asks for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentType {
    BlogPost,
    ServicePage,
    LocationPage,
    LandingPage,
    AboutPage,
    FaqPage,
    HowToGuide,
}

impl ContentType {
    /// Human-readable label used when describing the page to a model
    pub fn label(&self) -> &'static str {
        match self {
            ContentType::BlogPost => "blog post",
            ContentType::ServicePage => "service page",
            ContentType::LocationPage => "location-specific landing page",
            ContentType::LandingPage => "high-converting landing page",
            ContentType::AboutPage => "about us page",
            ContentType::FaqPage => "FAQ page",
            ContentType::HowToGuide => "how-to guide",
        }
    }
}

/// Lifecycle state of a single content item
///
/// Draft -> Queued -> Generating -> Completed | Failed. Failed items may
/// move back to Queued through a batch retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    Draft,
    Queued,
    Generating,
    Completed,
    Failed,
}

impl ItemStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemStatus::Completed | ItemStatus::Failed)
    }
}

/// Lifecycle state of a generation batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Processing,
    Completed,
    Failed,
}

impl BatchStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Completed | BatchStatus::Failed)
    }
}

/// API failure reasons for LLM provider requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ProviderFailure {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed (invalid API key)")]
    AuthenticationFailed,
    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
    /// Invalid request format or unparseable response
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Network/connection error
    #[error("Network error: {0}")]
    NetworkError(String),
    /// Server error from provider
    #[error("Provider server error: {0}")]
    ServerError(String),
    /// Service temporarily unavailable
    #[error("Service temporarily unavailable")]
    ServiceUnavailable,
    /// Request timeout
    #[error("Request timed out")]
    Timeout,
    /// Provider returned no usable text
    #[error("Provider returned an empty completion")]
    EmptyCompletion,
}

/// Incoming draft row for the item working set
///
/// Client-supplied ids are preserved so drafts stay stable across syncs;
/// rows without an id get a fresh one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
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
}

fn default_include_cta() -> bool {
    true
}

/// A single requested piece of content and its generation state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ItemId,
    pub title: String,
    pub content_type: ContentType,
    pub service_area: Option<String>,
    pub target_audience: Option<String>,
    pub geolocation: Option<String>,
    pub target_keywords: Option<String>,
    pub include_cta: bool,
    pub status: ItemStatus,
    pub generated_content: Option<String>,
    pub error_message: Option<String>,
    pub retry_count: u32,
    pub doc_id: Option<String>,
    pub doc_url: Option<String>,
    pub batch_id: Option<BatchId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create a fresh draft from an incoming row
    pub fn from_draft(draft: DraftItem, now: DateTime<Utc>) -> Self {
        Self {
            id: draft.id.unwrap_or_else(ItemId::new),
            title: draft.title,
            content_type: draft.content_type,
            service_area: draft.service_area,
            target_audience: draft.target_audience,
            geolocation: draft.geolocation,
            target_keywords: draft.target_keywords,
            include_cta: draft.include_cta,
            status: ItemStatus::Draft,
            generated_content: None,
            error_message: None,
            retry_count: 0,
            doc_id: None,
            doc_url: None,
            batch_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Business details woven into prompts and calls to action
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub contact_url: Option<String>,
}

/// Writing-style inputs; at most one is applied per prompt
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub example_content: Option<String>,
    #[serde(default)]
    pub custom_instruction: Option<String>,
}

/// Tunable generation parameters forwarded to the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

/// Everything a batch needs to rebuild identical prompts on retry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchContext {
    #[serde(default)]
    pub business: BusinessProfile,
    #[serde(default)]
    pub internal_links: Vec<String>,
    #[serde(default)]
    pub style: StyleOptions,
    #[serde(default)]
    pub word_count: Option<u32>,
    #[serde(default)]
    pub options: GenerationOptions,
}

/// A fixed fan-out unit tracking aggregate progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBatch {
    pub id: BatchId,
    pub total_items: u32,
    pub completed_items: u32,
    pub failed_items: u32,
    pub status: BatchStatus,
    pub created_at: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub context: BatchContext,
}

impl ContentBatch {
    /// Open a new batch over `total_items` items
    pub fn open(total_items: u32, context: BatchContext, now: DateTime<Utc>) -> Self {
        Self {
            id: BatchId::new(),
            total_items,
            completed_items: 0,
            failed_items: 0,
            status: BatchStatus::Processing,
            created_at: now,
            started_at: now,
            completed_at: None,
            context,
        }
    }

    /// Progress projection sent to clients
    pub fn progress(&self) -> BatchProgress {
        BatchProgress {
            batch_id: self.id.clone(),
            status: self.status.clone(),
            total_items: self.total_items,
            completed_items: self.completed_items,
            failed_items: self.failed_items,
        }
    }
}

/// Read-only progress snapshot for a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProgress {
    pub batch_id: BatchId,
    pub status: BatchStatus,
    pub total_items: u32,
    pub completed_items: u32,
    pub failed_items: u32,
}

/// Reference to an exported external document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedDoc {
    pub doc_id: String,
    pub doc_url: String,
}

/// One model-proposed content topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSuggestion {
    pub title: String,
    #[serde(default)]
    pub target_keywords: Option<String>,
    #[serde(default)]
    pub target_audience: Option<String>,
}
