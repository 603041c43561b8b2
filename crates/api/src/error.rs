use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use taskboard_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{ "error": <string> }`
/// envelope every failure path shares.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `taskboard_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An upload exceeding the configured size ceiling.
    #[error("payload too large")]
    PayloadTooLarge,

    /// Close was attempted on a board below 100% completion; carries the
    /// freshly computed progress for the diagnostic payload.
    #[error("board is not fully done")]
    BoardIncomplete(i64),

    /// An internal error with a human-readable message.
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    (StatusCode::NOT_FOUND, format!("{entity} {id} not found"))
                }
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "an internal error occurred".to_string(),
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "uploaded file is too large".to_string(),
            ),

            AppError::BoardIncomplete(progress) => {
                let body = json!({
                    "error": "board is not fully done",
                    "progress": progress,
                });
                return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
            }

            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        let body = json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status and client message.
///
/// - `RowNotFound` maps to 404.
/// - A locked/busy database maps to 409 so the caller knows the
///   transaction rolled back and a retry is reasonable.
/// - Everything else maps to 500 with a sanitized message; the detail is
///   logged, never exposed.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => {
            (StatusCode::NOT_FOUND, "resource not found".to_string())
        }
        sqlx::Error::Database(db_err) if db_err.message().contains("database is locked") => {
            tracing::warn!(error = %db_err, "write transaction rolled back");
            (
                StatusCode::CONFLICT,
                "conflicting write, please retry".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "an internal error occurred".to_string(),
            )
        }
    }
}
