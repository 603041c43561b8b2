//! Repository for boards: the aggregate root of the work-item tree.
//!
//! Board creation, membership replacement, cascade deletion, and closing
//! each run inside one transaction -- a concurrent reader either sees the
//! whole mutation or none of it.

use sqlx::{SqliteConnection, SqlitePool};
use taskboard_core::progress;
use taskboard_core::types::{DbId, DEFAULT_LIST_NAMES};
use uuid::Uuid;

use crate::models::board::{
    Board, BoardTree, BoardWithMembers, CardNode, CloseOutcome, CreateBoard, ListNode,
    UpdateBoard,
};
use crate::models::card::Card;
use crate::models::comment::Comment;
use crate::models::list::List;
use crate::models::tag::Tag;
use crate::models::task::Task;
use crate::models::user::MemberRef;

/// Column list for board queries.
const COLUMNS: &str = "board_id, fkboardid, project_id, title, description, status, \
    progress, addedby, addedbyid, created_at";

pub struct BoardRepo;

impl BoardRepo {
    /// Create a board inside one transaction: upsert the owning project by
    /// its caller-supplied id, insert the board with a generated opaque
    /// external id, seed the default lists at positions 0..2, and attach
    /// the initial members (duplicates ignored).
    pub async fn create(pool: &SqlitePool, input: &CreateBoard) -> Result<Board, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let now = chrono::Utc::now();

        sqlx::query(
            "INSERT INTO projects (project_id, project_name, status, created_at)
             VALUES ($1, $2, 'open', $3)
             ON CONFLICT (project_id) DO NOTHING",
        )
        .bind(input.project_id)
        .bind(&input.project_name)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let fkboardid = Uuid::new_v4().simple().to_string();
        let insert_query = format!(
            "INSERT INTO boards
                (fkboardid, project_id, title, description, status, progress,
                 addedby, addedbyid, created_at)
             VALUES ($1, $2, $3, $4, 'open', 0, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let board = sqlx::query_as::<_, Board>(&insert_query)
            .bind(&fkboardid)
            .bind(input.project_id)
            .bind(&input.project_name)
            .bind(&input.description)
            .bind(&input.addedby)
            .bind(input.addedbyid)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        for (pos, name) in DEFAULT_LIST_NAMES.iter().enumerate() {
            sqlx::query("INSERT INTO lists (board_id, list_name, position) VALUES ($1, $2, $3)")
                .bind(board.board_id)
                .bind(name)
                .bind(pos as i64)
                .execute(&mut *tx)
                .await?;
        }

        Self::attach_members(&mut tx, board.board_id, &input.member_ids).await?;

        tx.commit().await?;
        Ok(board)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE board_id = $1");
        sqlx::query_as::<_, Board>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_external_id(
        pool: &SqlitePool,
        fkboardid: &str,
    ) -> Result<Option<Board>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM boards WHERE fkboardid = $1");
        sqlx::query_as::<_, Board>(&query)
            .bind(fkboardid)
            .fetch_optional(pool)
            .await
    }

    /// Boards of one project, newest first, each with its member set.
    pub async fn list_by_project(
        pool: &SqlitePool,
        project_id: DbId,
    ) -> Result<Vec<BoardWithMembers>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM boards WHERE project_id = $1 ORDER BY created_at DESC"
        );
        let boards = sqlx::query_as::<_, Board>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await?;

        let mut rows = Vec::with_capacity(boards.len());
        for board in boards {
            let members = Self::members(pool, board.board_id).await?;
            rows.push(BoardWithMembers { board, members });
        }
        Ok(rows)
    }

    /// The board's member set, ordered by user id.
    pub async fn members(
        pool: &SqlitePool,
        board_id: DbId,
    ) -> Result<Vec<MemberRef>, sqlx::Error> {
        sqlx::query_as::<_, MemberRef>(
            "SELECT u.user_id AS id, u.name
             FROM board_members bm
             JOIN users u ON u.user_id = bm.user_id
             WHERE bm.board_id = $1
             ORDER BY u.user_id",
        )
        .bind(board_id)
        .fetch_all(pool)
        .await
    }

    /// Partial update. Field updates and membership replacement happen in
    /// one transaction; membership replacement is delete-all-then-insert,
    /// so concurrent replacements race last-write-wins.
    pub async fn update(
        pool: &SqlitePool,
        board_id: DbId,
        input: &UpdateBoard,
    ) -> Result<Option<Board>, sqlx::Error> {
        let mut tx = pool.begin().await?;

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
        if input.progress.is_some() {
            idx += 1;
            sets.push(format!("progress = ${idx}"));
        }

        if !sets.is_empty() {
            let query = format!(
                "UPDATE boards SET {} WHERE board_id = ${}",
                sets.join(", "),
                idx + 1
            );
            let mut update = sqlx::query(&query);
            if let Some(title) = &input.title {
                update = update.bind(title);
            }
            if let Some(description) = &input.description {
                update = update.bind(description);
            }
            if let Some(progress) = input.progress {
                update = update.bind(progress);
            }
            update.bind(board_id).execute(&mut *tx).await?;
        }

        if let Some(member_ids) = &input.member_ids {
            sqlx::query("DELETE FROM board_members WHERE board_id = $1")
                .bind(board_id)
                .execute(&mut *tx)
                .await?;
            Self::attach_members(&mut tx, board_id, member_ids).await?;
        }

        let query = format!("SELECT {COLUMNS} FROM boards WHERE board_id = $1");
        let board = sqlx::query_as::<_, Board>(&query)
            .bind(board_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(board)
    }

    /// Delete the board and its whole subtree in one transaction,
    /// children first: tasks/tags/comments of every card, then cards,
    /// then lists, then membership rows, then the board itself.
    ///
    /// Returns `false` when the board does not exist.
    pub async fn delete(pool: &SqlitePool, board_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        for table in ["tasks", "tags", "comments"] {
            let query = format!(
                "DELETE FROM {table} WHERE card_id IN
                    (SELECT card_id FROM cards WHERE list_id IN
                        (SELECT list_id FROM lists WHERE board_id = $1))"
            );
            sqlx::query(&query).bind(board_id).execute(&mut *tx).await?;
        }
        sqlx::query(
            "DELETE FROM cards WHERE list_id IN
                (SELECT list_id FROM lists WHERE board_id = $1)",
        )
        .bind(board_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM lists WHERE board_id = $1")
            .bind(board_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM board_members WHERE board_id = $1")
            .bind(board_id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM boards WHERE board_id = $1")
            .bind(board_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        tracing::debug!(board_id, "board subtree deleted");
        Ok(deleted > 0)
    }

    /// Refresh the cached progress column after a live recompute.
    pub async fn set_progress(
        pool: &SqlitePool,
        board_id: DbId,
        progress: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE boards SET progress = $1 WHERE board_id = $2")
            .bind(progress)
            .bind(board_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Recompute progress from live rows and close the board, both inside
    /// one transaction. A board below 100% is left untouched and the
    /// computed progress is reported instead.
    pub async fn close(pool: &SqlitePool, board_id: DbId) -> Result<CloseOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let counts = Self::card_counts(&mut tx, board_id).await?;
        let computed = progress::board_progress(&counts);
        if computed < 100 {
            return Ok(CloseOutcome::Incomplete(computed));
        }

        let query = format!(
            "UPDATE boards SET status = 'closed', progress = 100
             WHERE board_id = $1
             RETURNING {COLUMNS}"
        );
        let board = sqlx::query_as::<_, Board>(&query)
            .bind(board_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CloseOutcome::Closed(board))
    }

    /// Load the full kanban tree for a board addressed by its external id:
    /// lists and cards in position order, plus each card's tasks, tags,
    /// and comments (comments in creation order).
    pub async fn tree_by_external_id(
        pool: &SqlitePool,
        fkboardid: &str,
    ) -> Result<Option<BoardTree>, sqlx::Error> {
        let Some(board) = Self::find_by_external_id(pool, fkboardid).await? else {
            return Ok(None);
        };
        let members = Self::members(pool, board.board_id).await?;

        let lists = sqlx::query_as::<_, List>(
            "SELECT list_id, board_id, list_name, position
             FROM lists WHERE board_id = $1
             ORDER BY position, list_id",
        )
        .bind(board.board_id)
        .fetch_all(pool)
        .await?;

        let mut list_nodes = Vec::with_capacity(lists.len());
        for list in lists {
            let cards = sqlx::query_as::<_, Card>(
                "SELECT card_id, list_id, title, description, position,
                        image_path, startdate, enddate
                 FROM cards WHERE list_id = $1
                 ORDER BY position, card_id",
            )
            .bind(list.list_id)
            .fetch_all(pool)
            .await?;

            let mut card_nodes = Vec::with_capacity(cards.len());
            for card in cards {
                let tasks = sqlx::query_as::<_, Task>(
                    "SELECT task_id, card_id, task_name, status, assignee_id
                     FROM tasks WHERE card_id = $1 ORDER BY task_id",
                )
                .bind(card.card_id)
                .fetch_all(pool)
                .await?;
                let tags = sqlx::query_as::<_, Tag>(
                    "SELECT tag_id, card_id, title, color
                     FROM tags WHERE card_id = $1 ORDER BY tag_id",
                )
                .bind(card.card_id)
                .fetch_all(pool)
                .await?;
                let comments = sqlx::query_as::<_, Comment>(
                    "SELECT comment_id, card_id, author, message, created_at
                     FROM comments WHERE card_id = $1
                     ORDER BY created_at, comment_id",
                )
                .bind(card.card_id)
                .fetch_all(pool)
                .await?;

                card_nodes.push(CardNode {
                    card,
                    tasks,
                    tags,
                    comments,
                });
            }
            list_nodes.push(ListNode {
                list,
                cards: card_nodes,
            });
        }

        Ok(Some(BoardTree {
            board,
            members,
            lists: list_nodes,
        }))
    }

    /// Per-list `(name, card_count)` pairs for the progress computation,
    /// read inside the caller's transaction.
    async fn card_counts(
        conn: &mut SqliteConnection,
        board_id: DbId,
    ) -> Result<Vec<(String, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT l.list_name, COUNT(c.card_id)
             FROM lists l
             LEFT JOIN cards c ON c.list_id = l.list_id
             WHERE l.board_id = $1
             GROUP BY l.list_id, l.list_name",
        )
        .bind(board_id)
        .fetch_all(&mut *conn)
        .await
    }

    /// Insert membership rows, ignoring ids already attached.
    async fn attach_members(
        conn: &mut SqliteConnection,
        board_id: DbId,
        member_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for user_id in member_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO board_members (board_id, user_id) VALUES ($1, $2)",
            )
            .bind(board_id)
            .bind(*user_id)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }
}
