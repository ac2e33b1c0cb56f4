//! Victim entity model: one row per reported phishing interaction.

use phishtrack_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `victims` table.
///
/// `timestamp` is stored exactly as the reporting client supplied it; the
/// server never parses or normalises it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Victim {
    pub id: DbId,
    pub timestamp: Option<String>,
    pub username: Option<String>,
    pub hostname: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub workspace: Option<String>,
    pub vscode_version: Option<String>,
    pub event: Option<String>,
    pub campaign: Option<String>,
    pub email_sent: bool,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Canonical insert record for one reported interaction.
///
/// Field-name synonyms accepted on the wire (`platform`, `workspaceFolder`,
/// `vsCodeVersion`) are resolved by the API layer before this struct is
/// built; the store never sees aliases.
#[derive(Debug, Clone, Default)]
pub struct CreateVictim {
    pub timestamp: Option<String>,
    pub username: Option<String>,
    pub hostname: Option<String>,
    pub os: Option<String>,
    pub os_version: Option<String>,
    pub workspace: Option<String>,
    pub vscode_version: Option<String>,
    pub event: Option<String>,
    pub campaign: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}
