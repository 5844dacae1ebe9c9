//! Model-backed topic suggestion

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::traits::Generator;
use crate::types::GenerationRequest;
use shared::{ProviderFailure, TopicSuggestion};

use super::processor::strip_code_fences;
use super::prompt::{TopicRequest, build_topic_prompt};

/// Bounds on how many topics one round may ask for
const MIN_TOPICS: u32 = 1;
const MAX_TOPICS: u32 = 20;

/// Ask the model for fresh topic ideas
///
/// The requested count is clamped to 1..=20. The model is told to answer
/// with a bare JSON array; a fenced answer is tolerated, anything else is
/// surfaced as a provider failure.
pub async fn suggest_topics(adapter: &dyn Generator, request: &TopicRequest) -> EngineResult<Vec<TopicSuggestion>> {
    let mut request = request.clone();
    request.count = request.count.clamp(MIN_TOPICS, MAX_TOPICS);

    let generation = GenerationRequest {
        prompt: build_topic_prompt(&request),
        max_tokens: Some(2000),
        temperature: Some(0.8),
    };

    let response = adapter.generate(&generation).await.map_err(|reason| EngineError::ProviderError {
        provider: adapter.provider().to_string(),
        reason,
    })?;

    let cleaned = strip_code_fences(&response.content);
    let topics: Vec<TopicSuggestion> = serde_json::from_str(&cleaned).map_err(|e| EngineError::ProviderError {
        provider: adapter.provider().to_string(),
        reason: ProviderFailure::InvalidRequest(format!("Unparseable topic list: {e}")),
    })?;

    info!("💡 Suggested {} topics via {}", topics.len(), adapter.provider());
    Ok(topics)
}
