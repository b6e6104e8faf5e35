//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let (status, json) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let (status, json) = app.get("/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_store_and_sessions() {
    let app = TestApp::new();

    let (status, json) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["checks"]["database"]["status"], "healthy");
    assert_eq!(json["checks"]["realtime"]["active_sessions"], 0);
}

#[tokio::test]
async fn test_metrics_endpoint_exposes_realtime_series() {
    let app = TestApp::new();
    app.get("/health").await;

    let (status, body) = app.get("/metrics").await;

    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().unwrap_or_default();
    assert!(text.contains("presence_chat_http_requests_total"));
}

#[tokio::test]
async fn test_presence_starts_empty() {
    let app = TestApp::new();

    let (status, json) = app.get("/api/v1/presence").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["clients"], 0);
    assert_eq!(json["emails"], serde_json::json!([]));
}
