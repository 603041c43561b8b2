//! Handlers for list creation, deletion, and reordering.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use taskboard_core::error::CoreError;
use taskboard_core::types::DbId;
use taskboard_db::models::list::List;
use taskboard_db::repositories::list_repo::ReorderOutcome;
use taskboard_db::repositories::{BoardRepo, ListRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ListRow {
    pub listid: DbId,
    pub name: String,
    pub position: i64,
}

impl ListRow {
    pub fn new(list: List) -> Self {
        Self {
            listid: list.list_id,
            name: list.list_name,
            position: list.position,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateListBody {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderListsBody {
    #[serde(rename = "boardId")]
    pub board_id: Option<DbId>,
    #[serde(rename = "fromListId")]
    pub from_list_id: Option<DbId>,
    #[serde(rename = "toListId")]
    pub to_list_id: Option<DbId>,
}

/// POST /boards/{fkboardid}/lists
///
/// Appends a list at the end of the board's sequence.
pub async fn create_list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(fkboardid): Path<String>,
    Json(body): Json<CreateListBody>,
) -> AppResult<(StatusCode, Json<ListRow>)> {
    let name = body
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("name is required".into()))?;

    let board = BoardRepo::find_by_external_id(&state.pool, &fkboardid)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "board",
            id: fkboardid.clone(),
        })?;

    let list = ListRepo::create(&state.pool, board.board_id, &name).await?;
    Ok((StatusCode::CREATED, Json(ListRow::new(list))))
}

/// DELETE /lists/{listid}
///
/// Cascade-deletes the list's cards and their children, then re-densifies
/// the board's remaining list positions.
pub async fn delete_list(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(listid): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = ListRepo::delete(&state.pool, listid).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "list",
            id: listid.to_string(),
        }
        .into());
    }
    Ok(Json(json!({ "deleted": listid })))
}

/// PATCH /lists/reorder
///
/// Splice-reorders one board's lists and returns the new sequence.
pub async fn reorder_lists(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Json(body): Json<ReorderListsBody>,
) -> AppResult<Json<Vec<ListRow>>> {
    let (Some(board_id), Some(from), Some(to)) =
        (body.board_id, body.from_list_id, body.to_list_id)
    else {
        return Err(CoreError::Validation(
            "boardId, fromListId and toListId are required".into(),
        )
        .into());
    };

    match ListRepo::reorder(&state.pool, board_id, from, to).await? {
        ReorderOutcome::UnknownList(id) => Err(CoreError::NotFound {
            entity: "list",
            id: id.to_string(),
        }
        .into()),
        ReorderOutcome::Reordered => {
            let lists = ListRepo::list_by_board(&state.pool, board_id).await?;
            Ok(Json(lists.into_iter().map(ListRow::new).collect()))
        }
    }
}
