//! SQLite persistence layer for the phishing exercise tracker.
//!
//! Exposes pool construction plus the `models` / `repositories` split used
//! throughout the workspace. The schema lives in `migrations/` and is
//! applied idempotently on every startup via [`run_migrations`].

pub mod models;
pub mod repositories;

use sqlx::sqlite::SqlitePoolOptions;

pub type DbPool = sqlx::SqlitePool;

/// Create a connection pool from a database URL.
///
/// The URL should use `mode=rwc` (e.g. `sqlite:phishtrack.db?mode=rwc`) so
/// the database file is created on first run.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema. Safe to call on every startup; the schema
/// only uses `CREATE ... IF NOT EXISTS` statements.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
