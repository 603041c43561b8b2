use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A comment row. Displayed in creation order; there is no stored
/// position.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub comment_id: DbId,
    pub card_id: DbId,
    pub author: String,
    pub message: String,
    pub created_at: Timestamp,
}
