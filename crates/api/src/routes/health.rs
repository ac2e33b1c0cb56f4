use axum::{routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status; always `"healthy"` while the process runs.
    pub status: &'static str,
    /// Current server time, RFC 3339 UTC.
    pub timestamp: String,
}

/// GET /health -- constant-shape liveness probe.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
