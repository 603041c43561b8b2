//! Domain error taxonomy.
//!
//! The HTTP layer maps these onto status codes (404/400/409/401/403/500);
//! see `taskboard-api`'s error module. Repository-level `sqlx` failures are
//! not represented here -- they propagate as `sqlx::Error` and are
//! classified at the boundary.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced id does not exist, or does not belong to the claimed
    /// parent (e.g. a `fromListId` that is not a list of the given board).
    /// The id is kept as a string because boards are addressed both by the
    /// internal numeric key and by the opaque external id.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A required field is missing or malformed. User-correctable.
    #[error("{0}")]
    Validation(String),

    /// A cascading step could not complete; the enclosing transaction has
    /// been rolled back and the caller may retry.
    #[error("{0}")]
    Conflict(String),

    /// No principal, or the principal kind cannot perform this operation.
    #[error("{0}")]
    Unauthorized(String),

    /// A principal was presented but is not allowed this operation.
    #[error("{0}")]
    Forbidden(String),

    #[error("internal error: {0}")]
    Internal(String),
}
