use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use phishtrack_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{"status":"error",
/// "message":...}` JSON envelope every endpoint uses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `phishtrack_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                // The public contract answers duplicates with 400, not 409.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "status": "error",
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
