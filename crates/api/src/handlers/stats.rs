//! Handler for `GET /api/stats` — raw event listing with a count.

use axum::extract::{Query, State};
use axum::Json;
use phishtrack_db::models::victim::Victim;
use phishtrack_db::repositories::VictimRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /api/stats`.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// Restrict the listing to one campaign id.
    pub campaign: Option<String>,
}

/// Response body: the matching events plus their count.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub status: &'static str,
    pub count: usize,
    pub victims: Vec<Victim>,
}

/// GET /api/stats
///
/// An unknown campaign id yields `count: 0` with an empty list, not an
/// error.
pub async fn get_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> AppResult<Json<StatsResponse>> {
    let victims = VictimRepo::list(&state.pool, params.campaign.as_deref()).await?;

    Ok(Json(StatsResponse {
        status: "ok",
        count: victims.len(),
        victims,
    }))
}
