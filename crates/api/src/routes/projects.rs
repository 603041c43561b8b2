use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// ```text
/// GET /projects                  -> list_projects
/// GET /projects/{fkpoid}/boards  -> list_project_boards
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list_projects))
        .route(
            "/projects/{fkpoid}/boards",
            get(projects::list_project_boards),
        )
}
