//! Batch generation and retry handlers

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{GenerateRequest, RetryRequest};
use engine::create_adapter;
use shared::ProviderId;

/// Resolve the provider string and its configured API key
pub(super) fn resolve_provider(state: &AppState, provider: &str) -> Result<(ProviderId, String), ApiError> {
    let provider = ProviderId::from_str(provider)
        .ok_or_else(|| ApiError::bad_request(format!("Unknown provider: {provider}")))?;
    let api_key = state
        .api_key(&provider)
        .ok_or_else(|| ApiError::bad_request(format!("No {provider} API key configured")))?;
    Ok((provider, api_key.to_string()))
}

/// `POST /api/generate`: enroll the items into a new batch and return its
/// id immediately
///
/// Generation continues in the background; clients watch it through the
/// progress endpoints.
pub async fn start_generation(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<Value>> {
    if request.item_ids.is_empty() || request.provider.is_empty() {
        return Err(ApiError::bad_request("itemIds and provider are required"));
    }
    let (provider, api_key) = resolve_provider(&state, &request.provider)?;

    let context = request.context();
    let adapter = create_adapter(provider, api_key, request.model.clone());
    let started = state.pipeline.start_batch(request.item_ids, adapter, context).await?;

    Ok(Json(json!({ "data": { "batchId": started.batch_id } })))
}

/// `POST /api/retry`: requeue the failed items of a batch and run them
/// again
///
/// The retry round may name a different provider or model than the
/// original; prompts are rebuilt from the context stored on the batch.
pub async fn retry_failed(State(state): State<AppState>, Json(request): Json<RetryRequest>) -> ApiResult<Json<Value>> {
    let Some(batch_id) = request.batch_id else {
        return Err(ApiError::bad_request("batchId and provider are required"));
    };
    if request.provider.is_empty() {
        return Err(ApiError::bad_request("batchId and provider are required"));
    }
    let (provider, api_key) = resolve_provider(&state, &request.provider)?;

    let adapter = create_adapter(provider, api_key, request.model.clone());
    let outcome = state.pipeline.retry_batch(&batch_id, adapter).await?;

    Ok(Json(json!({
        "data": { "batchId": outcome.batch_id, "retrying": outcome.retried }
    })))
}
