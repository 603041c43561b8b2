use sqlx::FromRow;
use taskboard_core::types::{BoardStatus, DbId, Timestamp};

use crate::models::card::Card;
use crate::models::comment::Comment;
use crate::models::list::List;
use crate::models::tag::Tag;
use crate::models::task::Task;
use crate::models::user::MemberRef;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A board row.
///
/// `board_id` is the internal key; `fkboardid` is the opaque external id
/// used in share links and viewer tokens. The internal key must never
/// leave the persistence boundary where the external id is the addressing
/// key.
#[derive(Debug, Clone, FromRow)]
pub struct Board {
    pub board_id: DbId,
    pub fkboardid: String,
    pub project_id: DbId,
    pub title: String,
    pub description: String,
    pub status: BoardStatus,
    pub progress: i64,
    pub addedby: String,
    pub addedbyid: DbId,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Input for creating a board. The project is upserted by id if missing,
/// and `member_ids` are attached with duplicates ignored.
#[derive(Debug, Clone)]
pub struct CreateBoard {
    pub project_id: DbId,
    pub project_name: String,
    pub description: String,
    pub addedby: String,
    pub addedbyid: DbId,
    pub member_ids: Vec<DbId>,
}

/// Partial board update. `None` fields are left unchanged; a present
/// `member_ids` replaces the whole membership set.
#[derive(Debug, Clone, Default)]
pub struct UpdateBoard {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<i64>,
    pub member_ids: Option<Vec<DbId>>,
}

// ---------------------------------------------------------------------------
// Composite read shapes
// ---------------------------------------------------------------------------

/// A board together with its member set.
#[derive(Debug, Clone)]
pub struct BoardWithMembers {
    pub board: Board,
    pub members: Vec<MemberRef>,
}

/// The full kanban tree of one board: lists in position order, each list's
/// cards in position order, each card's children.
#[derive(Debug, Clone)]
pub struct BoardTree {
    pub board: Board,
    pub members: Vec<MemberRef>,
    pub lists: Vec<ListNode>,
}

#[derive(Debug, Clone)]
pub struct ListNode {
    pub list: List,
    pub cards: Vec<CardNode>,
}

#[derive(Debug, Clone)]
pub struct CardNode {
    pub card: Card,
    pub tasks: Vec<Task>,
    pub tags: Vec<Tag>,
    pub comments: Vec<Comment>,
}

/// Result of a close attempt: either the board was flipped to closed, or
/// the precondition failed and the computed progress is reported.
#[derive(Debug, Clone)]
pub enum CloseOutcome {
    Closed(Board),
    Incomplete(i64),
}
