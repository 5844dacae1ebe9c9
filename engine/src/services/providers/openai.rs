//! OpenAI chat-completions adapter

use async_trait::async_trait;

use shared::{ProviderFailure, ProviderId};

use crate::traits::Generator;
use crate::types::{GenerationRequest, GenerationResponse};

use super::{REQUEST_TIMEOUT, failure_for_status};

const DEFAULT_MODEL: &str = "gpt-4o";
const SYSTEM_PROMPT: &str = "You are a professional content writer. Always respond with the requested content directly.";

/// Adapter for the OpenAI chat completions API
pub struct OpenAIAdapter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIAdapter {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self::with_base_url(api_key, model, "https://api.openai.com".to_string())
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

    /// o-series and gpt-5 models reason before answering; they reject
    /// sampling parameters and take the system prompt under a different role
    fn is_reasoning_model(&self) -> bool {
        self.model.starts_with('o') || self.model.starts_with("gpt-5")
    }
}

#[async_trait]
impl Generator for OpenAIAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAI
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderFailure> {
        let reasoning = self.is_reasoning_model();
        // Reasoning tokens count against the completion limit, so give
        // reasoning models a much larger ceiling
        let tokens = if reasoning {
            (request.max_tokens.unwrap_or(4000) * 4).max(16_000)
        } else {
            request.max_tokens.unwrap_or(4000)
        };
        let use_completion_param = reasoning || self.model.starts_with("gpt-4o") || self.model.starts_with("gpt-4.1");
        let system_role = if reasoning { "developer" } else { "system" };

        let mut request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": system_role,
                    "content": SYSTEM_PROMPT
                },
                {
                    "role": "user",
                    "content": request.prompt
                }
            ]
        });
        let token_param = if use_completion_param { "max_completion_tokens" } else { "max_tokens" };
        request_body[token_param] = serde_json::json!(tokens);
        if !reasoning {
            request_body["temperature"] = serde_json::json!(request.temperature.unwrap_or(0.7));
        }

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
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

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| ProviderFailure::InvalidRequest("No content in response".to_string()))?;

        if content.is_empty() {
            return Err(ProviderFailure::EmptyCompletion);
        }

        let tokens_used = response_json
            .get("usage")
            .and_then(|usage| usage.get("total_tokens"))
            .and_then(|total| total.as_u64())
            .map(|total| total as u32);

        Ok(GenerationResponse {
            content: content.to_string(),
            tokens_used,
        })
    }
}
