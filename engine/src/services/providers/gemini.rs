//! Google Gemini adapter

use async_trait::async_trait;

use shared::{ProviderFailure, ProviderId};

use crate::traits::Generator;
use crate::types::{GenerationRequest, GenerationResponse};

use super::{REQUEST_TIMEOUT, failure_for_status};

const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Adapter for the Gemini generateContent API
pub struct GeminiAdapter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiAdapter {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self::with_base_url(api_key, model, "https://generativelanguage.googleapis.com".to_string())
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
impl Generator for GeminiAdapter {
    fn provider(&self) -> ProviderId {
        ProviderId::Gemini
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderFailure> {
        let request_body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        {
                            "text": request.prompt
                        }
                    ]
                }
            ],
            "generationConfig": {
                "maxOutputTokens": request.max_tokens.unwrap_or(4000),
                "temperature": request.temperature.unwrap_or(0.7)
            }
        });

        // Gemini authenticates through the query string rather than a header
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
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
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| ProviderFailure::InvalidRequest("No content in response".to_string()))?;

        if content.is_empty() {
            return Err(ProviderFailure::EmptyCompletion);
        }

        // Token counts are not guaranteed on every response
        let tokens_used = response_json.get("usageMetadata").map(|usage| {
            let prompt_tokens = usage.get("promptTokenCount").and_then(|t| t.as_u64()).unwrap_or(0) as u32;
            let candidate_tokens = usage
                .get("candidatesTokenCount")
                .and_then(|t| t.as_u64())
                .unwrap_or(0) as u32;
            prompt_tokens + candidate_tokens
        });

        Ok(GenerationResponse {
            content: content.to_string(),
            tokens_used,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let adapter = GeminiAdapter::new("sk-test".to_string(), None);
        assert_eq!(adapter.model, "gemini-1.5-pro");
    }
}
