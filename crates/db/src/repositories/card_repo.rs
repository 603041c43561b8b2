//! Repository for cards, including moves between lists.
//!
//! A move re-densifies the source and destination sequences in the same
//! transaction that reparents the card, so no reader ever observes a
//! duplicate or skipped position.

use sqlx::{SqliteConnection, SqlitePool};
use taskboard_core::position;
use taskboard_core::types::DbId;

use crate::models::card::{Card, UpdateCard};

const COLUMNS: &str =
    "card_id, list_id, title, description, position, image_path, startdate, enddate";

/// Result of a move attempt.
#[derive(Debug)]
pub enum MoveOutcome {
    Moved(Card),
    UnknownCard(DbId),
    UnknownList(DbId),
}

pub struct CardRepo;

impl CardRepo {
    /// Append a card to the end of its list. Fails with `Ok(None)` when
    /// the list does not exist.
    pub async fn create(
        pool: &SqlitePool,
        list_id: DbId,
        title: &str,
        description: &str,
    ) -> Result<Option<Card>, sqlx::Error> {
        let list_exists: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM lists WHERE list_id = $1")
                .bind(list_id)
                .fetch_optional(pool)
                .await?;
        if list_exists.is_none() {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO cards (list_id, title, description, position)
             VALUES ($1, $2, $3, (SELECT COUNT(*) FROM cards WHERE list_id = $1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Card>(&query)
            .bind(list_id)
            .bind(title)
            .bind(description)
            .fetch_one(pool)
            .await
            .map(Some)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Card>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cards WHERE card_id = $1");
        sqlx::query_as::<_, Card>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partial update of card fields; `None` fields are left unchanged.
    pub async fn update(
        pool: &SqlitePool,
        card_id: DbId,
        input: &UpdateCard,
    ) -> Result<Option<Card>, sqlx::Error> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 0;
        if input.title.is_some() {
            idx += 1;
            sets.push(format!("title = ${idx}"));
        }
        if input.description.is_some() {
            idx += 1;
            sets.push(format!("description = ${idx}"));
        }
        if input.startdate.is_some() {
            idx += 1;
            sets.push(format!("startdate = ${idx}"));
        }
        if input.enddate.is_some() {
            idx += 1;
            sets.push(format!("enddate = ${idx}"));
        }
        if input.image_path.is_some() {
            idx += 1;
            sets.push(format!("image_path = ${idx}"));
        }

        if sets.is_empty() {
            return Self::find_by_id(pool, card_id).await;
        }

        let query = format!(
            "UPDATE cards SET {} WHERE card_id = ${} RETURNING {COLUMNS}",
            sets.join(", "),
            idx + 1
        );
        let mut update = sqlx::query_as::<_, Card>(&query);
        if let Some(title) = &input.title {
            update = update.bind(title);
        }
        if let Some(description) = &input.description {
            update = update.bind(description);
        }
        if let Some(startdate) = input.startdate {
            update = update.bind(startdate);
        }
        if let Some(enddate) = input.enddate {
            update = update.bind(enddate);
        }
        if let Some(image_path) = &input.image_path {
            update = update.bind(image_path);
        }
        update.bind(card_id).fetch_optional(pool).await
    }

    /// Delete a card with its tasks/tags/comments, then re-densify the
    /// remaining cards of its list. One transaction.
    ///
    /// Returns `false` when the card does not exist. Deleting the sole
    /// card of a list leaves an empty sequence; the reindex is a no-op.
    pub async fn delete(pool: &SqlitePool, card_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let list_id: Option<(DbId,)> =
            sqlx::query_as("SELECT list_id FROM cards WHERE card_id = $1")
                .bind(card_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((list_id,)) = list_id else {
            return Ok(false);
        };

        for table in ["tasks", "tags", "comments"] {
            let query = format!("DELETE FROM {table} WHERE card_id = $1");
            sqlx::query(&query).bind(card_id).execute(&mut *tx).await?;
        }
        sqlx::query("DELETE FROM cards WHERE card_id = $1")
            .bind(card_id)
            .execute(&mut *tx)
            .await?;

        Self::densify(&mut tx, list_id, None).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Move a card to `dest_list_id` at `dest_index` (append when absent
    /// or out of range). Re-densifies the source and destination
    /// sequences; a move within one list is a splice. Moving a card onto
    /// the position it already occupies writes nothing.
    pub async fn move_to_list(
        pool: &SqlitePool,
        card_id: DbId,
        dest_list_id: DbId,
        dest_index: Option<i64>,
    ) -> Result<MoveOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM cards WHERE card_id = $1");
        let Some(card) = sqlx::query_as::<_, Card>(&query)
            .bind(card_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(MoveOutcome::UnknownCard(card_id));
        };

        let dest_exists: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM lists WHERE list_id = $1")
                .bind(dest_list_id)
                .fetch_optional(&mut *tx)
                .await?;
        if dest_exists.is_none() {
            return Ok(MoveOutcome::UnknownList(dest_list_id));
        }

        if card.list_id != dest_list_id {
            sqlx::query("UPDATE cards SET list_id = $1 WHERE card_id = $2")
                .bind(dest_list_id)
                .bind(card_id)
                .execute(&mut *tx)
                .await?;
            // The card is gone from the source sequence; close the gap.
            Self::densify(&mut tx, card.list_id, None).await?;
        }

        // Splice the card into the destination ordering at the requested
        // index and write only the positions that moved.
        Self::densify(&mut tx, dest_list_id, Some((card_id, card.position, dest_index)))
            .await?;

        let updated = sqlx::query_as::<_, Card>(&query)
            .bind(card_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(MoveOutcome::Moved(updated))
    }

    /// Rewrite positions of one list's cards to `0..count-1`.
    ///
    /// With `splice = Some((card_id, stored_position, requested_index))`
    /// the given card is pulled out of the ordering and reinserted at the
    /// clamped index before positions are planned.
    async fn densify(
        conn: &mut SqliteConnection,
        list_id: DbId,
        splice: Option<(DbId, i64, Option<i64>)>,
    ) -> Result<(), sqlx::Error> {
        let mut rows: Vec<(DbId, i64)> = sqlx::query_as(
            "SELECT card_id, position FROM cards
             WHERE list_id = $1 ORDER BY position, card_id",
        )
        .bind(list_id)
        .fetch_all(&mut *conn)
        .await?;

        if let Some((card_id, stored, requested)) = splice {
            rows.retain(|&(id, _)| id != card_id);
            let idx = position::clamp_insert_index(rows.len(), requested);
            rows.insert(idx, (card_id, stored));
        }

        for (card_id, pos) in position::reindex(&rows) {
            sqlx::query("UPDATE cards SET position = $1 WHERE card_id = $2")
                .bind(pos)
                .bind(card_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}
