use sqlx::FromRow;
use taskboard_core::types::DbId;

/// A tag row. Unordered within its card.
#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub tag_id: DbId,
    pub card_id: DbId,
    pub title: String,
    pub color: Option<String>,
}
