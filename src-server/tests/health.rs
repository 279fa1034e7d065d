use std::time::Duration;

use axum::{body::Body, http::Request};
use satview_server::{api::app_router, build_state, config::Config};
use tempfile::tempdir;
use tower::ServiceExt;

fn test_config(db_path: Option<String>) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path,
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(5),
        // Unroutable on purpose; none of these tests may reach upstream.
        coingecko_base_url: "http://127.0.0.1:9".to_string(),
    }
}

#[tokio::test]
async fn healthz_works() {
    let tmp = tempdir().unwrap();
    let db_path = tmp.path().join("test.db").to_string_lossy().to_string();
    let config = test_config(Some(db_path));
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn readyz_works_without_persistence() {
    let config = test_config(None);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/readyz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn history_treats_non_numeric_days_as_missing() {
    let config = test_config(None);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    // A garbage day-count must not be rejected at the query layer; it
    // reaches the handler like a missing parameter. The unroutable
    // upstream then fails the request with the endpoint's stable body.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bitcoin/history?days=abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Failed to fetch historical data");
}

#[tokio::test]
async fn price_upstream_failure_returns_error_body() {
    let config = test_config(None);
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/bitcoin/price")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 500);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Failed to fetch Bitcoin price data");
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}
