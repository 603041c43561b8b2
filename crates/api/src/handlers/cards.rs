//! Handlers for card creation, updates (including multipart image
//! replacement), moves, and deletion.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use taskboard_core::error::CoreError;
use taskboard_core::types::{DbId, Timestamp};
use taskboard_db::models::card::{Card, UpdateCard};
use taskboard_db::repositories::card_repo::MoveOutcome;
use taskboard_db::repositories::CardRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;
use crate::storage::ImageStore;

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// The card shape every card-returning endpoint renders. The stored image
/// path is resolved to an absolute URL; the path itself never leaves the
/// server.
#[derive(Debug, Serialize)]
pub struct CardRow {
    pub cardid: DbId,
    pub listid: DbId,
    pub title: String,
    pub description: String,
    pub position: i64,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub startdate: Option<Timestamp>,
    pub enddate: Option<Timestamp>,
}

impl CardRow {
    pub fn new(card: Card, images: &ImageStore) -> Self {
        Self {
            cardid: card.card_id,
            listid: card.list_id,
            title: card.title,
            description: card.description,
            position: card.position,
            image_url: card.image_path.as_deref().map(|path| images.url(path)),
            startdate: card.startdate,
            enddate: card.enddate,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCardBody {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoveCardBody {
    #[serde(rename = "cardId")]
    pub card_id: Option<DbId>,
    #[serde(rename = "destListId")]
    pub dest_list_id: Option<DbId>,
    #[serde(rename = "destIndex")]
    pub dest_index: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /lists/{listid}/cards
pub async fn create_card(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(listid): Path<DbId>,
    Json(body): Json<CreateCardBody>,
) -> AppResult<(StatusCode, Json<CardRow>)> {
    let title = body
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("title is required".into()))?;

    let card = CardRepo::create(
        &state.pool,
        listid,
        &title,
        body.description.as_deref().unwrap_or_default(),
    )
    .await?
    .ok_or_else(|| CoreError::NotFound {
        entity: "list",
        id: listid.to_string(),
    })?;

    Ok((StatusCode::CREATED, Json(CardRow::new(card, &state.images))))
}

/// PATCH /cards/move
///
/// Moves a card to another list (or repositions it within its own) at the
/// requested index, appending when the index is absent or out of range.
pub async fn move_card(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(body): Json<MoveCardBody>,
) -> AppResult<Json<CardRow>> {
    let card_id = body
        .card_id
        .ok_or_else(|| CoreError::Validation("cardId and destListId are required".into()))?;
    let dest_list_id = body
        .dest_list_id
        .ok_or_else(|| CoreError::Validation("cardId and destListId are required".into()))?;

    match CardRepo::move_to_list(&state.pool, card_id, dest_list_id, body.dest_index).await? {
        MoveOutcome::UnknownCard(id) => Err(CoreError::NotFound {
            entity: "card",
            id: id.to_string(),
        }
        .into()),
        MoveOutcome::UnknownList(id) => Err(CoreError::NotFound {
            entity: "list",
            id: id.to_string(),
        }
        .into()),
        MoveOutcome::Moved(card) => {
            tracing::info!(card_id, dest_list_id, "card moved");
            Ok(Json(CardRow::new(card, &state.images)))
        }
    }
}

/// PUT /cards/{cardid}
///
/// Multipart partial update: text fields `title`, `description`,
/// `startdate`, `enddate` (RFC 3339) and an optional `image` file part.
/// A replaced image's old file is removed best-effort -- a failed cleanup
/// is logged and never fails the request.
pub async fn update_card(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(cardid): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<CardRow>> {
    let mut input = UpdateCard::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => {
                input.title = Some(read_text(field).await?);
            }
            "description" => {
                input.description = Some(read_text(field).await?);
            }
            "startdate" => {
                input.startdate = Some(parse_date("startdate", &read_text(field).await?)?);
            }
            "enddate" => {
                input.enddate = Some(parse_date("enddate", &read_text(field).await?)?);
            }
            "image" => {
                let original = field.file_name().unwrap_or("upload.bin").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if data.len() > state.config.max_upload_bytes {
                    return Err(AppError::PayloadTooLarge);
                }
                let filename = state
                    .images
                    .store(&original, &data)
                    .await
                    .map_err(|e| AppError::InternalError(format!("image store failed: {e}")))?;
                input.image_path = Some(filename);
            }
            // Unknown parts are ignored, matching the partial-update
            // contract.
            _ => {}
        }
    }

    let previous = CardRepo::find_by_id(&state.pool, cardid).await?;
    let Some(previous) = previous else {
        // The card is gone; do not leave a freshly stored image behind.
        if let Some(orphan) = &input.image_path {
            discard_image(&state, orphan).await;
        }
        return Err(CoreError::NotFound {
            entity: "card",
            id: cardid.to_string(),
        }
        .into());
    };

    let card = CardRepo::update(&state.pool, cardid, &input)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "card",
            id: cardid.to_string(),
        })?;

    // Best-effort cleanup of the superseded image.
    if input.image_path.is_some() {
        if let Some(old) = previous.image_path {
            if card.image_path.as_deref() != Some(old.as_str()) {
                discard_image(&state, &old).await;
            }
        }
    }

    Ok(Json(CardRow::new(card, &state.images)))
}

/// DELETE /cards/{cardid}
pub async fn delete_card(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(cardid): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = CardRepo::delete(&state.pool, cardid).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "card",
            id: cardid.to_string(),
        }
        .into());
    }
    Ok(Json(json!({ "deleted": cardid })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

fn parse_date(field: &str, value: &str) -> Result<Timestamp, AppError> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| {
            AppError::Core(CoreError::Validation(format!(
                "{field} must be an RFC 3339 timestamp"
            )))
        })
}

async fn discard_image(state: &AppState, filename: &str) {
    if let Err(e) = state.images.delete(filename).await {
        tracing::warn!(filename, error = %e, "failed to remove stored image");
    }
}
