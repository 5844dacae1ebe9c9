//! Engine-internal types

use shared::BatchId;
use tokio::task::JoinHandle;

/// Parameters for a single completion call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl GenerationRequest {
    /// Request with advisory options left to provider defaults
    pub fn prompt_only(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Completion returned by a provider adapter; `content` is never empty
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResponse {
    pub content: String,
    pub tokens_used: Option<u32>,
}

/// Tuning knobs for batch dispatch
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Items generated in parallel within one dispatch group; the next
    /// group starts only after the current one drains
    pub chunk_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { chunk_size: 3 }
    }
}

/// A batch accepted for background processing
///
/// The handle resolves when the whole batch has been finalized; HTTP
/// callers drop it and poll instead, tests await it.
#[derive(Debug)]
pub struct StartedBatch {
    pub batch_id: BatchId,
    pub handle: JoinHandle<()>,
}

/// Result of requeueing a batch's failed items
#[derive(Debug)]
pub struct RetryOutcome {
    pub batch_id: BatchId,
    pub retried: usize,
    pub handle: JoinHandle<()>,
}
