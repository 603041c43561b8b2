//! Repository for the `comments` table.

use sqlx::SqlitePool;
use taskboard_core::types::DbId;

use crate::models::comment::Comment;

const COLUMNS: &str = "comment_id, card_id, author, message, created_at";

pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment under a card. `Ok(None)` when the card is missing.
    pub async fn create(
        pool: &SqlitePool,
        card_id: DbId,
        author: &str,
        message: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let card_exists: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM cards WHERE card_id = $1")
                .bind(card_id)
                .fetch_optional(pool)
                .await?;
        if card_exists.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO comments (card_id, author, message, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(card_id)
            .bind(author)
            .bind(message)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
            .map(Some)
    }
}
