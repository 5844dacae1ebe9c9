//! Topic suggestion handler

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::SuggestTopicsRequest;
use engine::{ContentStore, TopicRequest, create_adapter};

use super::generate::resolve_provider;

/// `POST /api/topics/suggest`: ask the model for fresh topic ideas
///
/// Existing item titles plus any titles the client sends along are fed
/// into the prompt so suggestions do not overlap with known content.
pub async fn suggest_topics(
    State(state): State<AppState>,
    Json(request): Json<SuggestTopicsRequest>,
) -> ApiResult<Json<Value>> {
    if request.count == 0 || request.provider.is_empty() || request.business_name.is_empty() {
        return Err(ApiError::bad_request("count, provider, and businessName are required"));
    }
    let (provider, api_key) = resolve_provider(&state, &request.provider)?;

    let mut existing_titles: Vec<String> = state
        .store
        .list_items()
        .await?
        .into_iter()
        .map(|item| item.title)
        .filter(|title| !title.trim().is_empty())
        .collect();
    existing_titles.extend(request.existing_topics.iter().cloned());

    let topic_request = TopicRequest {
        count: request.count,
        business_name: request.business_name.clone(),
        company_type: request.company_type.clone(),
        city: request.city.clone(),
        state: request.state.clone(),
        topic_direction: request.topic_direction.clone(),
        existing_titles,
    };

    let adapter = create_adapter(provider, api_key, request.model.clone());
    let topics = engine::suggest_topics(adapter.as_ref(), &topic_request).await?;

    Ok(Json(json!({ "data": topics })))
}
