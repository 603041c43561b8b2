//! Repository for the `projects` table.
//!
//! Projects are mostly written as a side effect of board creation (see
//! `BoardRepo::create`); this repository only serves the project listing.

use sqlx::SqlitePool;

use crate::models::project::Project;

const COLUMNS: &str = "project_id, project_name, description, status, created_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// All projects, ordered by id.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY project_id");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }
}
