//! Handlers for card tasks.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use taskboard_core::error::CoreError;
use taskboard_core::types::{DbId, TaskStatus};
use taskboard_db::models::task::{Task, UpdateTask};
use taskboard_db::repositories::TaskRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TaskRow {
    pub taskid: DbId,
    pub name: String,
    pub status: TaskStatus,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<DbId>,
}

impl TaskRow {
    pub fn new(task: Task) -> Self {
        Self {
            taskid: task.task_id,
            name: task.task_name,
            status: task.status,
            assignee_id: task.assignee_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    pub name: Option<String>,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<DbId>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskBody {
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
    #[serde(rename = "assigneeId")]
    pub assignee_id: Option<DbId>,
}

/// POST /cards/{cardid}/tasks
pub async fn create_task(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(cardid): Path<DbId>,
    Json(body): Json<CreateTaskBody>,
) -> AppResult<(StatusCode, Json<TaskRow>)> {
    let name = body
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("name is required".into()))?;

    let task = TaskRepo::create(&state.pool, cardid, &name, body.assignee_id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "card",
            id: cardid.to_string(),
        })?;

    Ok((StatusCode::CREATED, Json(TaskRow::new(task))))
}

/// PATCH /tasks/{taskid}
pub async fn update_task(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(taskid): Path<DbId>,
    Json(body): Json<UpdateTaskBody>,
) -> AppResult<Json<TaskRow>> {
    let input = UpdateTask {
        task_name: body.name,
        status: body.status,
        assignee_id: body.assignee_id,
    };

    let task = TaskRepo::update(&state.pool, taskid, &input)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "task",
            id: taskid.to_string(),
        })?;
    Ok(Json(TaskRow::new(task)))
}

/// DELETE /tasks/{taskid}
pub async fn delete_task(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Path(taskid): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = TaskRepo::delete(&state.pool, taskid).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "task",
            id: taskid.to_string(),
        }
        .into());
    }
    Ok(Json(json!({ "deleted": taskid })))
}
