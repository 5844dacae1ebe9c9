//! Item working-set handlers

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{DeleteItemsRequest, ItemRow, SyncItemsRequest};
use engine::ContentStore;
use shared::DraftItem;

/// `GET /api/items`: every item, oldest first
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let items = state.store.list_items().await?;
    Ok(Json(json!({ "data": items })))
}

/// `POST /api/items`: replace the DRAFT working set with the posted rows
///
/// Non-draft rows in the body are ignored; items past DRAFT are managed
/// by the generation pipeline, not by the editor.
pub async fn sync_items(State(state): State<AppState>, Json(request): Json<SyncItemsRequest>) -> ApiResult<Json<Value>> {
    let drafts: Vec<DraftItem> = request
        .items
        .into_iter()
        .filter(ItemRow::is_draft)
        .map(ItemRow::into_draft)
        .collect();

    let items = state.store.sync_draft_items(drafts).await?;
    Ok(Json(json!({ "data": items })))
}

/// `DELETE /api/items`: delete the given drafts
///
/// Ids pointing at non-draft items are skipped; the reply carries how
/// many rows actually went away.
pub async fn delete_items(
    State(state): State<AppState>,
    Json(request): Json<DeleteItemsRequest>,
) -> ApiResult<Json<Value>> {
    let requested = request.ids.len();
    let deleted = state.store.delete_draft_items(request.ids).await?;
    if deleted < requested {
        info!("Skipped {} non-draft items on delete", requested - deleted);
    }
    Ok(Json(json!({ "data": { "deleted": deleted } })))
}
