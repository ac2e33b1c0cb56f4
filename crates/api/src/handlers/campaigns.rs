//! Handlers for the `/api/campaigns` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use phishtrack_core::error::CoreError;
use phishtrack_db::models::campaign::{Campaign, CreateCampaign};
use phishtrack_db::repositories::CampaignRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::OkStatus;
use crate::state::AppState;

/// Response body for the campaign listing.
#[derive(Debug, Serialize)]
pub struct CampaignsResponse {
    pub status: &'static str,
    pub campaigns: Vec<Campaign>,
}

/// GET /api/campaigns
pub async fn list_campaigns(State(state): State<AppState>) -> AppResult<Json<CampaignsResponse>> {
    let campaigns = CampaignRepo::list(&state.pool).await?;

    Ok(Json(CampaignsResponse {
        status: "ok",
        campaigns,
    }))
}

/// POST /api/campaigns
///
/// Returns 201 on success. Reusing an existing `campaign_id` returns 400
/// with the fixed "Campaign already exists" message and leaves the
/// registered row untouched.
pub async fn create_campaign(
    State(state): State<AppState>,
    body: Result<Json<CreateCampaign>, JsonRejection>,
) -> AppResult<(StatusCode, Json<OkStatus>)> {
    let Json(input) =
        body.map_err(|rej| AppError::BadRequest(format!("Invalid JSON body: {rej}")))?;

    match CampaignRepo::create(&state.pool, &input).await {
        Ok(_) => Ok((StatusCode::CREATED, Json(OkStatus::new()))),
        Err(err) if CampaignRepo::is_duplicate(&err) => Err(AppError::Core(CoreError::Conflict(
            "Campaign already exists".to_string(),
        ))),
        Err(err) => Err(err.into()),
    }
}
