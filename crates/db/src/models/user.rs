use serde::Serialize;
use sqlx::FromRow;
use taskboard_core::types::{DbId, Role, Timestamp};

/// A user row. Referenced by board membership, board creator fields, and
/// task assignees; never owned by the work-item tree.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: Timestamp,
}

/// Input for inserting a user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// The `{ id, name }` projection used for member listings and board
/// member sets.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberRef {
    pub id: DbId,
    pub name: String,
}
