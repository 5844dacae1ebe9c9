//! Liveness endpoint

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::error::ApiResult;
use crate::state::AppState;
use engine::ContentStore;

/// `GET /api/health`: status plus store counts
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let items = state.store.list_items().await?;
    let batches = state.store.list_batches(usize::MAX).await?;

    Ok(Json(json!({
        "status": "ok",
        "items": items.len(),
        "batches": batches.len(),
    })))
}
