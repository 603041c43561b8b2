use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A project row. Project ids are caller-supplied (an external id space),
/// and a project may be created implicitly as a side effect of board
/// creation.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub project_id: DbId,
    pub project_name: String,
    pub description: String,
    pub status: String,
    pub created_at: Timestamp,
}
