pub mod dashboard;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{campaigns, ingest, stats};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// POST /log         -> ingest::log_event
/// GET  /stats       -> stats::get_stats
/// GET  /campaigns   -> campaigns::list_campaigns
/// POST /campaigns   -> campaigns::create_campaign
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/log", post(ingest::log_event))
        .route("/stats", get(stats::get_stats))
        .route(
            "/campaigns",
            get(campaigns::list_campaigns).post(campaigns::create_campaign),
        )
}
