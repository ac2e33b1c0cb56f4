//! Serves the static dashboard page.
//!
//! The page is fully self-contained HTML/JS embedded at compile time; it
//! fetches everything it shows from `/api/stats` client-side, so there is
//! no server-side data injection here.

use axum::response::Html;
use axum::{routing::get, Router};

use crate::state::AppState;

const DASHBOARD_HTML: &str = include_str!("../../static/dashboard.html");

/// GET /dashboard
async fn dashboard() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// Mount the dashboard route (root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}
