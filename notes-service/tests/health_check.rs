mod common;

use axum::http::StatusCode;
use common::TestRouter;
use notes_service::services::{init_metrics, InMemoryNoteStore};
use std::sync::Arc;

#[tokio::test]
async fn health_check_works() {
    let app = TestRouter::new();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "notes-service");
}

#[tokio::test]
async fn health_check_ignores_store_state() {
    let app = TestRouter::with_store(Arc::new(InMemoryNoteStore::unavailable()));

    let (status, _) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn readiness_reflects_store() {
    let ready = TestRouter::new();
    let (status, body) = ready.get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    let down = TestRouter::with_store(Arc::new(InMemoryNoteStore::unavailable()));
    let (status, body) = down.get("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Service unavailable");
}

#[tokio::test]
async fn metrics_endpoint_returns_prometheus_format() {
    init_metrics();
    let app = TestRouter::new();

    // Generate at least one request and one store operation
    let id = app.create("counted").await;
    app.get(&format!("/note/{}", id)).await;

    let (status, body) = app.get("/metrics").await;

    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().expect("metrics body is plain text");
    assert!(
        text.contains(r#"notes_operations_total{operation="create",outcome="success"}"#),
        "store operation counter missing: {}",
        text
    );
    // Labelled by route template, never by concrete id
    assert!(
        text.contains(r#"http_requests_total{method="POST",path="/note",status="200"}"#),
        "request counter missing: {}",
        text
    );
    assert!(text.contains(r#"http_requests_total{method="GET",path="/note/:id",status="200"}"#));
    assert!(!text.contains(&id));
    assert!(text.contains("http_request_duration_seconds"));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestRouter::new();

    let response = app
        .raw(
            axum::http::Request::builder()
                .uri("/")
                .header("x-request-id", "req-42")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.headers()["x-request-id"], "req-42");
}
