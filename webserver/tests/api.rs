//! Router-level API tests
//!
//! Exercise the HTTP surface against a real in-memory store. Provider
//! calls never happen here: requests either fail validation first or are
//! rejected for a missing API key.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{InMemoryStore, PipelineConfig};
use shared::{ItemId, ProviderId};
use webserver::{AppState, build_router};

fn app() -> Router {
    app_with_keys(HashMap::new())
}

fn app_with_keys(api_keys: HashMap<ProviderId, String>) -> Router {
    let state = AppState::new(
        Arc::new(InMemoryStore::new()),
        PipelineConfig { chunk_size: 3 },
        Duration::from_millis(20),
        api_keys,
    );
    build_router(state)
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn send_json(router: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

#[tokio::test]
async fn test_health_reports_store_counts() {
    let router = app();
    let (status, body) = get(&router, "/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["items"], 0);
    assert_eq!(body["batches"], 0);
}

#[tokio::test]
async fn test_items_sync_list_delete_flow() {
    let router = app();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/items",
        json!({"items": [
            {"title": "Emergency Plumbing", "contentType": "SERVICE_PAGE"},
            {"title": "Winter Pipe Care", "contentType": "BLOG_POST", "includeCta": false},
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let saved = body["data"].as_array().unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved.iter().all(|item| item["status"] == "DRAFT"));

    let (status, body) = get(&router, "/api/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let first_id = body["data"][0]["id"].as_str().unwrap().to_string();
    let (status, body) = send_json(&router, "DELETE", "/api/items", json!({"ids": [first_id]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], 1);

    let (_, body) = get(&router, "/api/items").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_sync_ignores_non_draft_rows() {
    let router = app();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/items",
        json!({"items": [
            {"title": "Already Done", "contentType": "BLOG_POST", "status": "COMPLETED"},
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_preserves_client_ids() {
    let router = app();
    let client_id = ItemId::new().to_string();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/items",
        json!({"items": [
            {"id": client_id, "title": "Drain Care", "contentType": "BLOG_POST"},
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], client_id.as_str());
}

#[tokio::test]
async fn test_generate_requires_items_and_provider() {
    let router = app();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/generate",
        json!({"itemIds": [], "provider": "openai"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "itemIds and provider are required");

    let (status, _) = send_json(
        &router,
        "POST",
        "/api/generate",
        json!({"itemIds": [ItemId::new().to_string()]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_rejects_unknown_provider() {
    let router = app();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/generate",
        json!({"itemIds": [ItemId::new().to_string()], "provider": "mistral"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown provider: mistral");
}

#[tokio::test]
async fn test_generate_without_key_leaves_no_batch_behind() {
    let router = app();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/generate",
        json!({"itemIds": [ItemId::new().to_string()], "provider": "openai"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No openai API key configured");

    let (_, body) = get(&router, "/api/batches").await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_unknown_item_rolls_back() {
    // With a key configured, an unknown item id passes validation but
    // fails enrollment; the half-open batch must not linger.
    let mut api_keys = HashMap::new();
    api_keys.insert(ProviderId::OpenAI, "test-key".to_string());
    let router = app_with_keys(api_keys);

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/generate",
        json!({"itemIds": [ItemId::new().to_string()], "provider": "openai"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));

    let (_, body) = get(&router, "/api/batches").await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_retry_requires_batch_and_provider() {
    let router = app();

    let (status, body) = send_json(&router, "POST", "/api/retry", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "batchId and provider are required");
}

#[tokio::test]
async fn test_batches_listing_starts_empty() {
    let router = app();

    let (status, body) = get(&router, "/api/batches").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_progress_unknown_batch_is_404() {
    let router = app();
    let uri = format!("/api/batches/{}/progress", shared::BatchId::new());

    let (status, body) = get(&router, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_progress_stream_unknown_batch_sends_one_error_event() {
    let router = app();
    let uri = format!("/api/batches/{}/progress/stream", shared::BatchId::new());
    let request = Request::builder().uri(&uri).body(Body::empty()).unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/event-stream"));

    // The follow loop emits one NotFound event and closes, so the whole
    // body is finite and collectable.
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert_eq!(text.matches("Batch not found").count(), 1);
}

#[tokio::test]
async fn test_suggest_topics_requires_fields() {
    let router = app();

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/topics/suggest",
        json!({"count": 0, "provider": "openai", "businessName": "Acme"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "count, provider, and businessName are required");

    let (status, body) = send_json(
        &router,
        "POST",
        "/api/topics/suggest",
        json!({"count": 5, "provider": "gemini", "businessName": "Acme"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No gemini API key configured");
}
