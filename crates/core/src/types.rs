/// All database primary keys are SQLite INTEGER PRIMARY KEY AUTOINCREMENT.
pub type DbId = i64;

/// All server-assigned timestamps are UTC.
///
/// Victim-reported timestamps are NOT this type: they arrive as opaque
/// strings from the client and are stored verbatim.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
