//! Batch history and progress handlers

use std::convert::Infallible;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::Stream;
use futures_util::stream;
use serde_json::{Value, json};

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::BatchSummary;
use engine::{ContentStore, ProgressEvent};
use shared::BatchId;

/// How many batches the history listing returns
const BATCH_HISTORY_LIMIT: usize = 20;

/// `GET /api/batches`: the newest batches with per-item digests
pub async fn list_batches(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let batches = state.store.list_batches(BATCH_HISTORY_LIMIT).await?;

    let mut summaries = Vec::with_capacity(batches.len());
    for batch in batches {
        let items = state.store.items_for_batch(&batch.id).await?;
        summaries.push(BatchSummary::new(batch, &items));
    }

    Ok(Json(json!({ "data": summaries })))
}

/// `GET /api/batches/:batch_id/progress`: one-off progress snapshot
pub async fn batch_progress(
    State(state): State<AppState>,
    Path(batch_id): Path<BatchId>,
) -> ApiResult<Json<Value>> {
    let progress = state.notifier.snapshot(&batch_id).await?;
    Ok(Json(json!({ "data": progress })))
}

/// `GET /api/batches/:batch_id/progress/stream`: SSE progress feed
///
/// One snapshot event per poll tick until the batch reaches a terminal
/// status, then the stream ends. An unknown batch id yields a single
/// error event before the stream closes.
pub async fn batch_progress_stream(
    State(state): State<AppState>,
    Path(batch_id): Path<BatchId>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.notifier.follow(batch_id);

    let events = stream::unfold(receiver, |mut receiver| async move {
        let event = receiver.recv().await?;
        let payload = match event {
            ProgressEvent::Snapshot(progress) => json!({
                "status": progress.status,
                "totalItems": progress.total_items,
                "completedItems": progress.completed_items,
                "failedItems": progress.failed_items,
            }),
            ProgressEvent::NotFound { .. } => json!({ "error": "Batch not found" }),
        };
        Some((Ok(Event::default().data(payload.to_string())), receiver))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
