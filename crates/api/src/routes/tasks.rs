use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// ```text
/// POST   /cards/{cardid}/tasks -> create_task
/// PATCH  /tasks/{taskid}       -> update_task
/// DELETE /tasks/{taskid}       -> delete_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cards/{cardid}/tasks", post(tasks::create_task))
        .route(
            "/tasks/{taskid}",
            patch(tasks::update_task).delete(tasks::delete_task),
        )
}
