//! Handlers for board CRUD, the kanban view, share links, and closing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use taskboard_core::access::allow_board_view;
use taskboard_core::error::CoreError;
use taskboard_core::progress;
use taskboard_core::types::{BoardStatus, DbId, Timestamp};
use taskboard_db::models::board::{Board, BoardTree, CloseOutcome, CreateBoard, UpdateBoard};
use taskboard_db::models::user::MemberRef;
use taskboard_db::repositories::BoardRepo;

use crate::auth::jwt;
use crate::error::{AppError, AppResult};
use crate::handlers::cards::CardRow;
use crate::handlers::comments::CommentRow;
use crate::handlers::tags::TagRow;
use crate::handlers::tasks::TaskRow;
use crate::middleware::auth::MaybePrincipal;
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;
use crate::storage::ImageStore;

// ---------------------------------------------------------------------------
// Wire shapes
// ---------------------------------------------------------------------------

/// The board shape every board-returning endpoint renders.
#[derive(Debug, Serialize)]
pub struct BoardRow {
    pub boardid: DbId,
    pub fkboardid: String,
    pub title: String,
    pub description: String,
    pub members: Vec<MemberRef>,
    pub status: BoardStatus,
    pub progress: i64,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    pub addedby: String,
    pub addedbyid: DbId,
    pub fkpoid: DbId,
}

impl BoardRow {
    pub fn new(board: Board, members: Vec<MemberRef>) -> Self {
        Self {
            boardid: board.board_id,
            fkboardid: board.fkboardid,
            title: board.title,
            description: board.description,
            members,
            status: board.status,
            progress: board.progress,
            created_at: board.created_at,
            addedby: board.addedby,
            addedbyid: board.addedbyid,
            fkpoid: board.project_id,
        }
    }
}

/// The kanban view: board fields plus the full list/card tree and the
/// freshly computed progress.
#[derive(Debug, Serialize)]
pub struct KanbanBoard {
    pub boardid: DbId,
    pub fkboardid: String,
    pub title: String,
    pub description: String,
    pub members: Vec<MemberRef>,
    pub status: BoardStatus,
    pub progress: i64,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
    pub fkpoid: DbId,
    pub lists: Vec<KanbanList>,
}

#[derive(Debug, Serialize)]
pub struct KanbanList {
    pub listid: DbId,
    pub name: String,
    pub position: i64,
    pub cards: Vec<KanbanCard>,
}

#[derive(Debug, Serialize)]
pub struct KanbanCard {
    #[serde(flatten)]
    pub card: CardRow,
    pub tasks: Vec<TaskRow>,
    pub tags: Vec<TagRow>,
    pub comments: Vec<CommentRow>,
}

impl KanbanBoard {
    fn new(tree: BoardTree, progress: i64, images: &ImageStore) -> Self {
        let BoardTree {
            board,
            members,
            lists,
        } = tree;
        Self {
            boardid: board.board_id,
            fkboardid: board.fkboardid,
            title: board.title,
            description: board.description,
            members,
            status: board.status,
            progress,
            created_at: board.created_at,
            fkpoid: board.project_id,
            lists: lists
                .into_iter()
                .map(|node| KanbanList {
                    listid: node.list.list_id,
                    name: node.list.list_name,
                    position: node.list.position,
                    cards: node
                        .cards
                        .into_iter()
                        .map(|card_node| KanbanCard {
                            card: CardRow::new(card_node.card, images),
                            tasks: card_node.tasks.into_iter().map(TaskRow::new).collect(),
                            tags: card_node.tags.into_iter().map(TagRow::new).collect(),
                            comments: card_node
                                .comments
                                .into_iter()
                                .map(CommentRow::new)
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShareResponse {
    pub fkboardid: String,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateBoardBody {
    #[serde(rename = "projectName")]
    pub project_name: Option<String>,
    pub fkpoid: Option<DbId>,
    pub addedby: Option<String>,
    pub addedbyid: Option<DbId>,
    pub description: Option<String>,
    #[serde(rename = "memberIds")]
    pub member_ids: Option<Vec<DbId>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoardBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<i64>,
    #[serde(rename = "memberIds")]
    pub member_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /boards
///
/// Creates the board (upserting its project), seeds the default lists,
/// and attaches the initial members. The creator fields default to the
/// authenticated user when the body omits them.
pub async fn create_board(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(body): Json<CreateBoardBody>,
) -> AppResult<(StatusCode, Json<BoardRow>)> {
    let project_name = body
        .project_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("projectName and fkpoid are required".into()))?;
    let fkpoid = body
        .fkpoid
        .ok_or_else(|| CoreError::Validation("projectName and fkpoid are required".into()))?;

    let input = CreateBoard {
        project_id: fkpoid,
        project_name,
        description: body.description.unwrap_or_default(),
        addedby: body.addedby.unwrap_or_else(|| user.name.clone()),
        addedbyid: body.addedbyid.unwrap_or(user.user_id),
        member_ids: body.member_ids.unwrap_or_default(),
    };

    let board = BoardRepo::create(&state.pool, &input).await?;
    let members = BoardRepo::members(&state.pool, board.board_id).await?;

    tracing::info!(
        board_id = board.board_id,
        fkboardid = %board.fkboardid,
        user_id = user.user_id,
        "board created"
    );
    Ok((StatusCode::CREATED, Json(BoardRow::new(board, members))))
}

/// PATCH /boards/{boardid}
///
/// Partial update; a present `memberIds` replaces the whole member set.
pub async fn update_board(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(boardid): Path<DbId>,
    Json(body): Json<UpdateBoardBody>,
) -> AppResult<Json<BoardRow>> {
    let input = UpdateBoard {
        title: body.title,
        description: body.description,
        progress: body.progress,
        member_ids: body.member_ids,
    };

    let board = BoardRepo::update(&state.pool, boardid, &input)
        .await?
        .ok_or_else(|| board_not_found(boardid))?;
    let members = BoardRepo::members(&state.pool, board.board_id).await?;
    Ok(Json(BoardRow::new(board, members)))
}

/// DELETE /boards/{boardid}
///
/// Admin only. The board and its whole subtree disappear atomically.
pub async fn delete_board(
    RequireAdmin(user): RequireAdmin,
    State(state): State<AppState>,
    Path(boardid): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = BoardRepo::delete(&state.pool, boardid).await?;
    if !deleted {
        return Err(board_not_found(boardid).into());
    }

    tracing::info!(board_id = boardid, user_id = user.user_id, "board deleted");
    Ok(Json(json!({ "deleted": boardid })))
}

/// GET /boards/{fkboardid}/kanban
///
/// Public read, gated only for viewer capabilities bound to another
/// board. Progress is recomputed from live rows on every call; the cached
/// column is refreshed when it drifted.
pub async fn kanban(
    MaybePrincipal(principal): MaybePrincipal,
    State(state): State<AppState>,
    Path(fkboardid): Path<String>,
) -> AppResult<Json<KanbanBoard>> {
    allow_board_view(principal.as_ref(), &fkboardid)?;

    let tree = BoardRepo::tree_by_external_id(&state.pool, &fkboardid)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "board",
            id: fkboardid.clone(),
        })?;

    let counts: Vec<(String, i64)> = tree
        .lists
        .iter()
        .map(|node| (node.list.list_name.clone(), node.cards.len() as i64))
        .collect();
    let computed = progress::board_progress(&counts);
    if computed != tree.board.progress {
        BoardRepo::set_progress(&state.pool, tree.board.board_id, computed).await?;
    }

    Ok(Json(KanbanBoard::new(tree, computed, &state.images)))
}

/// GET /boards/{fkboardid}/share
///
/// Issues a board-scoped viewer token for share links. Requires a staff
/// principal -- a viewer must not mint further tokens.
pub async fn share(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(fkboardid): Path<String>,
) -> AppResult<Json<ShareResponse>> {
    let board = BoardRepo::find_by_external_id(&state.pool, &fkboardid)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "board",
            id: fkboardid.clone(),
        })?;

    let token = jwt::issue_viewer_token(&board.fkboardid, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("failed to sign viewer token: {e}")))?;
    Ok(Json(ShareResponse {
        fkboardid: board.fkboardid,
        token,
    }))
}

/// PATCH /boards/{fkboardid}/close
///
/// Recomputes progress and closes the board only at 100%; otherwise fails
/// with the computed progress in the diagnostic payload.
pub async fn close(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(fkboardid): Path<String>,
) -> AppResult<Json<BoardRow>> {
    let board = BoardRepo::find_by_external_id(&state.pool, &fkboardid)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "board",
            id: fkboardid.clone(),
        })?;

    match BoardRepo::close(&state.pool, board.board_id).await? {
        CloseOutcome::Incomplete(progress) => Err(AppError::BoardIncomplete(progress)),
        CloseOutcome::Closed(board) => {
            let members = BoardRepo::members(&state.pool, board.board_id).await?;
            tracing::info!(
                board_id = board.board_id,
                user_id = user.user_id,
                "board closed"
            );
            Ok(Json(BoardRow::new(board, members)))
        }
    }
}

fn board_not_found(boardid: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "board",
        id: boardid.to_string(),
    }
}
