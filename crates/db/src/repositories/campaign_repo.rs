//! Repository for the `campaigns` table.

use chrono::{SecondsFormat, Utc};
use phishtrack_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::campaign::{Campaign, CreateCampaign};

/// Column list for `campaigns` queries.
const COLUMNS: &str = "\
    id, campaign_id, name, description, created_at, active, \
    total_targets, total_victims";

/// Provides CRUD and counter operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, stamping `created_at` server-side.
    ///
    /// A second insert with the same `campaign_id` fails on the unique
    /// index and leaves the existing row untouched; recognise that case
    /// with [`CampaignRepo::is_duplicate`].
    pub async fn create(pool: &SqlitePool, input: &CreateCampaign) -> Result<DbId, sqlx::Error> {
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        sqlx::query_scalar(
            "INSERT INTO campaigns \
                (campaign_id, name, description, created_at, total_targets) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&input.campaign_id)
        .bind(&input.name)
        .bind(input.description.as_deref().unwrap_or(""))
        .bind(&created_at)
        .bind(input.total_targets.unwrap_or(0))
        .fetch_one(pool)
        .await
    }

    /// Whether an insert error is the unique violation raised by reusing
    /// an existing `campaign_id`.
    pub fn is_duplicate(err: &sqlx::Error) -> bool {
        matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
    }

    /// List all campaigns, newest creation time first.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns ORDER BY created_at DESC");
        sqlx::query_as::<_, Campaign>(&query).fetch_all(pool).await
    }

    /// Find a campaign by its public identifier.
    pub async fn find_by_campaign_id(
        pool: &SqlitePool,
        campaign_id: &str,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE campaign_id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(campaign_id)
            .fetch_optional(pool)
            .await
    }

    /// Recount victims for the campaign and persist the cached total.
    ///
    /// The count and the update are separate statements; a crash between an
    /// event insert and this recount leaves the cache stale until the next
    /// event for the same campaign. Returns the freshly counted total.
    pub async fn recount_victims(
        pool: &SqlitePool,
        campaign_id: &str,
    ) -> Result<i64, sqlx::Error> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM victims WHERE campaign = $1")
            .bind(campaign_id)
            .fetch_one(pool)
            .await?;

        sqlx::query("UPDATE campaigns SET total_victims = $1 WHERE campaign_id = $2")
            .bind(total)
            .bind(campaign_id)
            .execute(pool)
            .await?;

        Ok(total)
    }
}
