//! Campaign entity model.

use phishtrack_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `campaigns` table.
///
/// `total_victims` is a cache: it is always recountable as the number of
/// `victims` rows whose `campaign` column equals `campaign_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub campaign_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub active: bool,
    pub total_targets: i64,
    pub total_victims: i64,
}

/// Create DTO for `POST /api/campaigns`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    pub campaign_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub total_targets: Option<i64>,
}
