//! Repository for the `tags` table.

use sqlx::SqlitePool;
use taskboard_core::types::DbId;

use crate::models::tag::Tag;

const COLUMNS: &str = "tag_id, card_id, title, color";

pub struct TagRepo;

impl TagRepo {
    /// Insert a tag under a card. `Ok(None)` when the card is missing.
    pub async fn create(
        pool: &SqlitePool,
        card_id: DbId,
        title: &str,
        color: Option<&str>,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let card_exists: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM cards WHERE card_id = $1")
                .bind(card_id)
                .fetch_optional(pool)
                .await?;
        if card_exists.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO tags (card_id, title, color) VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(card_id)
            .bind(title)
            .bind(color)
            .fetch_one(pool)
            .await
            .map(Some)
    }

    /// Returns `false` when the tag does not exist.
    pub async fn delete(pool: &SqlitePool, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let deleted = sqlx::query("DELETE FROM tags WHERE tag_id = $1")
            .bind(tag_id)
            .execute(pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
