//! Vendor-specific completion adapters
//!
//! One adapter per provider, each speaking the vendor's own wire format
//! over plain HTTP. Adapters are stateless beyond their API key and model
//! choice and never retry; callers decide what a failure means.

pub mod anthropic;
pub mod gemini;
pub mod openai;

pub use anthropic::AnthropicAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAIAdapter;

use std::sync::Arc;
use std::time::Duration;

use shared::{ProviderFailure, ProviderId};

use crate::traits::Generator;

/// Applied per request; content generation is slow on large word counts
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Construct the adapter for a provider choice
///
/// `model` falls back to each vendor's default when absent.
pub fn create_adapter(provider: ProviderId, api_key: String, model: Option<String>) -> Arc<dyn Generator> {
    match provider {
        ProviderId::OpenAI => Arc::new(OpenAIAdapter::new(api_key, model)),
        ProviderId::Anthropic => Arc::new(AnthropicAdapter::new(api_key, model)),
        ProviderId::Gemini => Arc::new(GeminiAdapter::new(api_key, model)),
    }
}

/// Map a non-success HTTP status to a provider failure
pub(crate) fn failure_for_status(status: reqwest::StatusCode) -> ProviderFailure {
    match status.as_u16() {
        401 => ProviderFailure::AuthenticationFailed,
        429 => ProviderFailure::RateLimitExceeded,
        503 => ProviderFailure::ServiceUnavailable,
        _ => ProviderFailure::ServerError(status.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_adapter_routes_by_provider() {
        let openai = create_adapter(ProviderId::OpenAI, "sk-test".to_string(), None);
        let anthropic = create_adapter(ProviderId::Anthropic, "sk-test".to_string(), None);
        let gemini = create_adapter(ProviderId::Gemini, "sk-test".to_string(), None);

        assert_eq!(openai.provider(), ProviderId::OpenAI);
        assert_eq!(anthropic.provider(), ProviderId::Anthropic);
        assert_eq!(gemini.provider(), ProviderId::Gemini);
    }

    #[test]
    fn test_failure_for_status_mapping() {
        assert!(matches!(
            failure_for_status(reqwest::StatusCode::UNAUTHORIZED),
            ProviderFailure::AuthenticationFailed
        ));
        assert!(matches!(
            failure_for_status(reqwest::StatusCode::TOO_MANY_REQUESTS),
            ProviderFailure::RateLimitExceeded
        ));
        assert!(matches!(
            failure_for_status(reqwest::StatusCode::SERVICE_UNAVAILABLE),
            ProviderFailure::ServiceUnavailable
        ));
        assert!(matches!(
            failure_for_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            ProviderFailure::ServerError(_)
        ));
    }
}
