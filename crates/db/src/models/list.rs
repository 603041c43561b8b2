use sqlx::FromRow;
use taskboard_core::types::DbId;

/// A list row. `position` is dense `0..count-1` among the lists of one
/// board; the repository maintains that invariant inside transactions.
#[derive(Debug, Clone, FromRow)]
pub struct List {
    pub list_id: DbId,
    pub board_id: DbId,
    pub list_name: String,
    pub position: i64,
}
