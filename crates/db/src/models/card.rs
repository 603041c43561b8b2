use sqlx::FromRow;
use taskboard_core::types::{DbId, Timestamp};

/// A card row. `position` is dense `0..count-1` among the cards of one
/// list. `image_path` is the stored filename in the image store, never a
/// full URL.
#[derive(Debug, Clone, FromRow)]
pub struct Card {
    pub card_id: DbId,
    pub list_id: DbId,
    pub title: String,
    pub description: String,
    pub position: i64,
    pub image_path: Option<String>,
    pub startdate: Option<Timestamp>,
    pub enddate: Option<Timestamp>,
}

/// Partial card update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateCard {
    pub title: Option<String>,
    pub description: Option<String>,
    pub startdate: Option<Timestamp>,
    pub enddate: Option<Timestamp>,
    pub image_path: Option<String>,
}
