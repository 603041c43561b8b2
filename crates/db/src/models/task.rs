use sqlx::FromRow;
use taskboard_core::types::{DbId, TaskStatus};

/// A task row. Tasks are unordered within their card.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    pub task_id: DbId,
    pub card_id: DbId,
    pub task_name: String,
    pub status: TaskStatus,
    pub assignee_id: Option<DbId>,
}

/// Partial task update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    pub task_name: Option<String>,
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<DbId>,
}
