//! Handlers for card tags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;
use taskboard_db::models::tag::Tag;
use taskboard_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TagRow {
    pub tagid: DbId,
    pub title: String,
    pub color: Option<String>,
}

impl TagRow {
    pub fn new(tag: Tag) -> Self {
        Self {
            tagid: tag.tag_id,
            title: tag.title,
            color: tag.color,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTagBody {
    pub title: Option<String>,
    pub color: Option<String>,
}

/// POST /cards/{cardid}/tags
pub async fn create_tag(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(cardid): Path<DbId>,
    Json(body): Json<CreateTagBody>,
) -> AppResult<(StatusCode, Json<TagRow>)> {
    let title = body
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("title is required".into()))?;

    let tag = TagRepo::create(&state.pool, cardid, &title, body.color.as_deref())
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "card",
            id: cardid.to_string(),
        })?;

    Ok((StatusCode::CREATED, Json(TagRow::new(tag))))
}

/// DELETE /tags/{tagid}
pub async fn delete_tag(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(tagid): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = TagRepo::delete(&state.pool, tagid).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "tag",
            id: tagid.to_string(),
        }
        .into());
    }
    Ok(Json(json!({ "deleted": tagid })))
}
