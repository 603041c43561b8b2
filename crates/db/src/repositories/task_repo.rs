//! Repository for the `tasks` table.

use sqlx::SqlitePool;
use taskboard_core::types::DbId;

use crate::models::task::{Task, UpdateTask};

const COLUMNS: &str = "task_id, card_id, task_name, status, assignee_id";

pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task under a card. `Ok(None)` when the card is missing.
    pub async fn create(
        pool: &SqlitePool,
        card_id: DbId,
        name: &str,
        assignee_id: Option<DbId>,
    ) -> Result<Option<Task>, sqlx::Error> {
        let card_exists: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM cards WHERE card_id = $1")
                .bind(card_id)
                .fetch_optional(pool)
                .await?;
        if card_exists.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO tasks (card_id, task_name, status, assignee_id)
             VALUES ($1, $2, 'todo', $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(card_id)
            .bind(name)
            .bind(assignee_id)
            .fetch_one(pool)
            .await
            .map(Some)
    }

    /// Partial update; `None` fields are left unchanged.
    pub async fn update(
        pool: &SqlitePool,
        task_id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 0;
        if input.task_name.is_some() {
            idx += 1;
            sets.push(format!("task_name = ${idx}"));
        }
        if input.status.is_some() {
            idx += 1;
            sets.push(format!("status = ${idx}"));
        }
        if input.assignee_id.is_some() {
            idx += 1;
            sets.push(format!("assignee_id = ${idx}"));
        }

        if sets.is_empty() {
            let query = format!("SELECT {COLUMNS} FROM tasks WHERE task_id = $1");
            return sqlx::query_as::<_, Task>(&query)
                .bind(task_id)
                .fetch_optional(pool)
                .await;
        }

        let query = format!(
            "UPDATE tasks SET {} WHERE task_id = ${} RETURNING {COLUMNS}",
            sets.join(", "),
            idx + 1
        );
        let mut update = sqlx::query_as::<_, Task>(&query);
        if let Some(name) = &input.task_name {
            update = update.bind(name);
        }
        if let Some(status) = input.status {
            update = update.bind(status);
        }
        if let Some(assignee_id) = input.assignee_id {
            update = update.bind(assignee_id);
        }
        update.bind(task_id).fetch_optional(pool).await
    }

    /// Returns `false` when the task does not exist.
    pub async fn delete(pool: &SqlitePool, task_id: DbId) -> Result<bool, sqlx::Error> {
        let deleted = sqlx::query("DELETE FROM tasks WHERE task_id = $1")
            .bind(task_id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
