//! Router assembly

pub mod handlers;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::state::AppState;
use handlers::{batches, generate, health, items, topics};

/// Build the application router over the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_check))
        .route(
            "/api/items",
            get(items::list_items).post(items::sync_items).delete(items::delete_items),
        )
        .route("/api/generate", post(generate::start_generation))
        .route("/api/retry", post(generate::retry_failed))
        .route("/api/batches", get(batches::list_batches))
        .route("/api/batches/:batch_id/progress", get(batches::batch_progress))
        .route("/api/batches/:batch_id/progress/stream", get(batches::batch_progress_stream))
        .route("/api/topics/suggest", post(topics::suggest_topics))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive()) // Allow CORS for development
                .into_inner(),
        )
        .with_state(state)
}
