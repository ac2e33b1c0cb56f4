//! Handler for `POST /api/log` — event ingestion.
//!
//! The flow is persist-first: the event row is the authoritative record,
//! the campaign recount follows it, and the awareness email is a strictly
//! best-effort third step whose failure never affects the response.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use phishtrack_core::types::DbId;
use phishtrack_db::models::victim::CreateVictim;
use phishtrack_db::repositories::{CampaignRepo, VictimRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::client_meta::ClientMeta;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Raw wire body for `POST /api/log`.
///
/// Reporting clients vary in which key names they send, so every accepted
/// synonym is its own optional field here. [`LogEventBody::resolve`] folds
/// them into the canonical [`CreateVictim`]; the store never sees aliases.
#[derive(Debug, Default, Deserialize)]
pub struct LogEventBody {
    pub timestamp: Option<String>,
    pub username: Option<String>,
    pub hostname: Option<String>,
    pub os: Option<String>,
    pub platform: Option<String>,
    pub os_version: Option<String>,
    pub workspace: Option<String>,
    #[serde(rename = "workspaceFolder")]
    pub workspace_folder: Option<String>,
    pub vscode_version: Option<String>,
    #[serde(rename = "vsCodeVersion")]
    pub vs_code_version: Option<String>,
    pub event: Option<String>,
    pub campaign: Option<String>,
}

impl LogEventBody {
    /// Resolve field synonyms into the canonical insert record, preferring
    /// the canonical key when a client sent both.
    fn resolve(self, meta: ClientMeta) -> CreateVictim {
        CreateVictim {
            timestamp: self.timestamp,
            username: self.username,
            hostname: self.hostname,
            os: self.os.or(self.platform),
            os_version: self.os_version,
            workspace: self.workspace.or(self.workspace_folder),
            vscode_version: self.vscode_version.or(self.vs_code_version),
            event: self.event,
            campaign: self.campaign,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
        }
    }
}

/// Response body for a successful ingestion.
#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub status: &'static str,
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// POST /api/log
///
/// Persist the event, recount the campaign counter when the event carries a
/// campaign id, then attempt the awareness email.
pub async fn log_event(
    State(state): State<AppState>,
    meta: ClientMeta,
    body: Result<Json<LogEventBody>, JsonRejection>,
) -> AppResult<Json<LogResponse>> {
    let Json(body) =
        body.map_err(|rej| AppError::BadRequest(format!("Invalid JSON body: {rej}")))?;

    let record = body.resolve(meta);
    tracing::info!(
        username = record.username.as_deref().unwrap_or("unknown"),
        hostname = record.hostname.as_deref().unwrap_or("unknown"),
        ip = record.ip_address.as_deref().unwrap_or("unknown"),
        "New victim event"
    );

    let id = VictimRepo::insert(&state.pool, &record).await?;

    if let Some(campaign_id) = record.campaign.as_deref() {
        CampaignRepo::recount_victims(&state.pool, campaign_id).await?;
    }

    notify_best_effort(&state, id, &record).await;

    Ok(Json(LogResponse { status: "ok", id }))
}

/// Attempt the awareness email and mark the event on success.
///
/// Runs after the event is durable, so every failure here is logged and
/// swallowed. A failed send leaves `email_sent` false and is never retried.
async fn notify_best_effort(state: &AppState, id: DbId, record: &CreateVictim) {
    let Some(mailer) = &state.mailer else {
        return;
    };
    let Some(to_email) = mailer.recipient_for(record.username.as_deref()) else {
        return;
    };

    match mailer.send(&to_email, record).await {
        Ok(()) => {
            if let Err(err) = VictimRepo::mark_email_sent(&state.pool, id).await {
                tracing::error!(victim_id = id, error = %err, "Failed to mark email sent");
            }
        }
        Err(err) => {
            tracing::error!(to = %to_email, error = %err, "Failed to send awareness email");
        }
    }
}
