use serde::{Deserialize, Serialize};

/// All database primary keys are SQLite INTEGER (64-bit).
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// User role. There is no finer permission granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

/// Board lifecycle status. A closed board always carries progress 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BoardStatus {
    Open,
    Closed,
}

/// Per-task completion status. Tasks are unordered within a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Done,
}

/// Names of the lists seeded on every new board, in position order.
pub const DEFAULT_LIST_NAMES: [&str; 3] = ["To-do", "In-progress", "Done"];
