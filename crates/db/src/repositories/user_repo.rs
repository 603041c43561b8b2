//! Repository for the `users` table.

use sqlx::SqlitePool;
use taskboard_core::types::DbId;

use crate::models::user::{CreateUser, MemberRef, User};

/// Column list for user queries.
const COLUMNS: &str = "user_id, name, email, password_hash, role, created_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE user_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up a user by email for login.
    pub async fn find_by_email(
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// The `{ id, name }` member directory, ordered by id.
    pub async fn list_members(pool: &SqlitePool) -> Result<Vec<MemberRef>, sqlx::Error> {
        sqlx::query_as::<_, MemberRef>(
            "SELECT user_id AS id, name FROM users ORDER BY user_id",
        )
        .fetch_all(pool)
        .await
    }
}
