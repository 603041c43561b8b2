use axum::routing::{delete, patch, post};
use axum::Router;

use crate::handlers::lists;
use crate::state::AppState;

/// ```text
/// POST   /boards/{boardid}/lists -> create_list (board external id)
/// DELETE /lists/{listid}         -> delete_list
/// PATCH  /lists/reorder          -> reorder_lists
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/boards/{boardid}/lists", post(lists::create_list))
        .route("/lists/reorder", patch(lists::reorder_lists))
        .route("/lists/{listid}", delete(lists::delete_list))
}
