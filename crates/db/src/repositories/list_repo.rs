//! Repository for lists, including the list-level position maintenance.
//!
//! Position writes always happen inside the same transaction as the
//! mutation that disturbed the ordering, and only rows whose position
//! actually changed are written.

use sqlx::{SqliteConnection, SqlitePool};
use taskboard_core::position;
use taskboard_core::types::DbId;

use crate::models::list::List;

const COLUMNS: &str = "list_id, board_id, list_name, position";

/// Result of a reorder attempt. `UnknownList` carries the id that is not
/// a list of the addressed board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    Reordered,
    UnknownList(DbId),
}

pub struct ListRepo;

impl ListRepo {
    /// Append a list to the end of its board's sequence. The position
    /// subselect makes insert-at-end atomic -- no reindex of existing
    /// siblings is needed.
    pub async fn create(
        pool: &SqlitePool,
        board_id: DbId,
        name: &str,
    ) -> Result<List, sqlx::Error> {
        let query = format!(
            "INSERT INTO lists (board_id, list_name, position)
             VALUES ($1, $2, (SELECT COUNT(*) FROM lists WHERE board_id = $1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, List>(&query)
            .bind(board_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<List>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lists WHERE list_id = $1");
        sqlx::query_as::<_, List>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One board's lists in position order.
    pub async fn list_by_board(
        pool: &SqlitePool,
        board_id: DbId,
    ) -> Result<Vec<List>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lists WHERE board_id = $1 ORDER BY position, list_id"
        );
        sqlx::query_as::<_, List>(&query)
            .bind(board_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a list with its cards and their children, then re-densify
    /// the remaining lists of the board. One transaction.
    ///
    /// Returns `false` when the list does not exist.
    pub async fn delete(pool: &SqlitePool, list_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let board_id: Option<(DbId,)> =
            sqlx::query_as("SELECT board_id FROM lists WHERE list_id = $1")
                .bind(list_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((board_id,)) = board_id else {
            return Ok(false);
        };

        for table in ["tasks", "tags", "comments"] {
            let query = format!(
                "DELETE FROM {table} WHERE card_id IN
                    (SELECT card_id FROM cards WHERE list_id = $1)"
            );
            sqlx::query(&query).bind(list_id).execute(&mut *tx).await?;
        }
        sqlx::query("DELETE FROM cards WHERE list_id = $1")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM lists WHERE list_id = $1")
            .bind(list_id)
            .execute(&mut *tx)
            .await?;

        Self::densify(&mut tx, board_id).await?;

        tx.commit().await?;
        tracing::debug!(list_id, board_id, "list subtree deleted");
        Ok(true)
    }

    /// Reorder one board's lists with splice semantics: the `from` list is
    /// removed from the sequence and reinserted at the index currently
    /// occupied by `to`.
    pub async fn reorder(
        pool: &SqlitePool,
        board_id: DbId,
        from: DbId,
        to: DbId,
    ) -> Result<ReorderOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let rows: Vec<(DbId, i64)> = sqlx::query_as(
            "SELECT list_id, position FROM lists
             WHERE board_id = $1 ORDER BY position, list_id",
        )
        .bind(board_id)
        .fetch_all(&mut *tx)
        .await?;

        let ids: Vec<DbId> = rows.iter().map(|&(id, _)| id).collect();
        let order = match position::reorder(&ids, from, to) {
            Ok(order) => order,
            Err(unknown) => return Ok(ReorderOutcome::UnknownList(unknown)),
        };

        // Pair the new ordering with the positions currently stored so
        // only moved rows are written.
        let reordered: Vec<(DbId, i64)> = order
            .iter()
            .map(|id| {
                let stored = rows.iter().find(|&&(rid, _)| rid == *id).map(|&(_, p)| p);
                (*id, stored.unwrap_or_default())
            })
            .collect();
        for (list_id, pos) in position::reindex(&reordered) {
            sqlx::query("UPDATE lists SET position = $1 WHERE list_id = $2")
                .bind(pos)
                .bind(list_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(ReorderOutcome::Reordered)
    }

    /// Rewrite positions of a board's lists to `0..count-1`, touching only
    /// rows whose stored position drifted. No-op on an empty board.
    async fn densify(conn: &mut SqliteConnection, board_id: DbId) -> Result<(), sqlx::Error> {
        let rows: Vec<(DbId, i64)> = sqlx::query_as(
            "SELECT list_id, position FROM lists
             WHERE board_id = $1 ORDER BY position, list_id",
        )
        .bind(board_id)
        .fetch_all(&mut *conn)
        .await?;

        for (list_id, pos) in position::reindex(&rows) {
            sqlx::query("UPDATE lists SET position = $1 WHERE list_id = $2")
                .bind(pos)
                .bind(list_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}
