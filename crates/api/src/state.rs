use std::sync::Arc;

use phishtrack_notify::AwarenessMailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: phishtrack_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Awareness mailer; `None` when SMTP is not configured, in which case
    /// ingestion skips the notification step entirely.
    pub mailer: Option<Arc<AwarenessMailer>>,
}
