//! Shared response envelope types for API handlers.
//!
//! Every endpoint answers with a JSON object carrying a `status` field
//! (`"ok"` on success); typed structs here and in the handler modules keep
//! those shapes out of ad-hoc `json!` calls.

use serde::Serialize;

/// Bare `{"status":"ok"}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct OkStatus {
    pub status: &'static str,
}

impl OkStatus {
    pub fn new() -> Self {
        Self { status: "ok" }
    }
}

impl Default for OkStatus {
    fn default() -> Self {
        Self::new()
    }
}
