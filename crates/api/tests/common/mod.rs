//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use phishtrack_api::config::ServerConfig;
use phishtrack_api::router::build_app_router;
use phishtrack_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        database_url: "sqlite::memory:".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses. No mailer is configured, so
/// ingestion takes the email-disabled path and `email_sent` stays false.
pub fn build_test_app(pool: SqlitePool) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: None,
    };

    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
