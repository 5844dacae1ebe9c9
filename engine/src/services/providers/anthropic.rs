//! Anthropic messages adapter

use async_trait::async_trait;

use shared::{ProviderFailure, ProviderId};

use crate::traits::Generator;
use crate::types::{GenerationRequest, GenerationResponse};

use super::{REQUEST_TIMEOUT, failure_for_status};

const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
const API_VERSION: &str = "2023-06-01";

/// Adapter for the Anthropic messages API
pub struct AnthropicAdapter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicAdapter {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self::with_base_url(api_key, model, "https://api.anthropic.com".to_string())
    }

    /// Adapter pointed at a custom endpoint, for test servers
    pub fn with_base_url(api_key: String, model: Option<String>, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
        }
    }
}

#[async_trait]
impl Generator for AnthropicAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderFailure> {
        let request_body = serde_json::json!({
            "model": self.model,
            "max_tokens": request.max_tokens.unwrap_or(4000),
            "messages": [
                {
                    "role": "user",
                    "content": request.prompt
                }
            ]
        });

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .header("anthropic-version", API_VERSION)
            .timeout(REQUEST_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ProviderFailure::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failure_for_status(response.status()));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProviderFailure::InvalidRequest(format!("Failed to parse response: {}", e)))?;

        // The answer arrives as typed content blocks; only the first text
        // block matters here
        let content = response_json
            .get("content")
            .and_then(|blocks| blocks.as_array())
            .and_then(|blocks| {
                blocks
                    .iter()
                    .find(|block| block.get("type").and_then(|t| t.as_str()) == Some("text"))
            })
            .and_then(|block| block.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| ProviderFailure::InvalidRequest("No content in response".to_string()))?;

        if content.is_empty() {
            return Err(ProviderFailure::EmptyCompletion);
        }

        let usage = response_json.get("usage");
        let input_tokens = usage
            .and_then(|u| u.get("input_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0) as u32;
        let output_tokens = usage
            .and_then(|u| u.get("output_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0) as u32;

        Ok(GenerationResponse {
            content: content.to_string(),
            tokens_used: Some(input_tokens + output_tokens),
        })
    }
}
