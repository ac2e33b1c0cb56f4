#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
