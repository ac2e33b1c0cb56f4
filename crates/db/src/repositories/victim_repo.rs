//! Repository for the `victims` table.

use phishtrack_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::victim::{CreateVictim, Victim};

/// Column list for `victims` queries.
const COLUMNS: &str = "\
    id, timestamp, username, hostname, os, os_version, workspace, \
    vscode_version, event, campaign, email_sent, ip_address, user_agent";

/// Provides read/write operations for logged victim events.
pub struct VictimRepo;

impl VictimRepo {
    /// Insert a new victim row, returning the generated id.
    ///
    /// Nothing is validated here; absent fields are stored as NULL.
    pub async fn insert(pool: &SqlitePool, input: &CreateVictim) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO victims \
                (timestamp, username, hostname, os, os_version, workspace, \
                 vscode_version, event, campaign, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING id",
        )
        .bind(&input.timestamp)
        .bind(&input.username)
        .bind(&input.hostname)
        .bind(&input.os)
        .bind(&input.os_version)
        .bind(&input.workspace)
        .bind(&input.vscode_version)
        .bind(&input.event)
        .bind(&input.campaign)
        .bind(&input.ip_address)
        .bind(&input.user_agent)
        .fetch_one(pool)
        .await
    }

    /// List victims, optionally filtered to one campaign id, newest
    /// reported timestamp first.
    ///
    /// Ordering is lexicographic on the stored timestamp string, so rows
    /// whose clients used different timestamp formats will not interleave
    /// chronologically.
    pub async fn list(
        pool: &SqlitePool,
        campaign: Option<&str>,
    ) -> Result<Vec<Victim>, sqlx::Error> {
        match campaign {
            Some(campaign_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM victims WHERE campaign = $1 ORDER BY timestamp DESC"
                );
                sqlx::query_as::<_, Victim>(&query)
                    .bind(campaign_id)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM victims ORDER BY timestamp DESC");
                sqlx::query_as::<_, Victim>(&query).fetch_all(pool).await
            }
        }
    }

    /// Set the email-sent flag for exactly one victim.
    ///
    /// Returns whether a row was updated; an unknown id is a no-op. The
    /// flag only ever transitions false to true.
    pub async fn mark_email_sent(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE victims SET email_sent = 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
