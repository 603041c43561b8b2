//! Handlers for project listings.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use taskboard_core::types::DbId;
use taskboard_db::repositories::{BoardRepo, ProjectRepo};

use crate::error::AppResult;
use crate::handlers::boards::BoardRow;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProjectRow {
    pub id: DbId,
    pub name: String,
}

/// GET /projects
pub async fn list_projects(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectRow>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(
        projects
            .into_iter()
            .map(|p| ProjectRow {
                id: p.project_id,
                name: p.project_name,
            })
            .collect(),
    ))
}

/// GET /projects/{fkpoid}/boards
///
/// Boards of one project, newest first. An unknown project id yields an
/// empty list, matching the project's implicit-creation semantics.
pub async fn list_project_boards(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(fkpoid): Path<DbId>,
) -> AppResult<Json<Vec<BoardRow>>> {
    let rows = BoardRepo::list_by_project(&state.pool, fkpoid).await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| BoardRow::new(row.board, row.members))
            .collect(),
    ))
}
