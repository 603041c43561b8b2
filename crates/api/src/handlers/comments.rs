//! Handlers for card comments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use taskboard_core::error::CoreError;
use taskboard_core::types::{DbId, Timestamp};
use taskboard_db::models::comment::Comment;
use taskboard_db::repositories::CommentRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CommentRow {
    pub commentid: DbId,
    pub author: String,
    pub message: String,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

impl CommentRow {
    pub fn new(comment: Comment) -> Self {
        Self {
            commentid: comment.comment_id,
            author: comment.author,
            message: comment.message,
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentBody {
    pub author: Option<String>,
    pub message: Option<String>,
}

/// POST /cards/{cardid}/comments
///
/// The author is free text; it defaults to the authenticated user's name.
pub async fn create_comment(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(cardid): Path<DbId>,
    Json(body): Json<CreateCommentBody>,
) -> AppResult<(StatusCode, Json<CommentRow>)> {
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("message is required".into()))?;
    let author = body
        .author
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| user.name.clone());

    let comment = CommentRepo::create(&state.pool, cardid, &author, &message)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "card",
            id: cardid.to_string(),
        })?;

    Ok((StatusCode::CREATED, Json(CommentRow::new(comment))))
}
