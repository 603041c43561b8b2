use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// ```text
/// POST   /cards/{cardid}/tags -> create_tag
/// DELETE /tags/{tagid}        -> delete_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cards/{cardid}/tags", post(tags::create_tag))
        .route("/tags/{tagid}", delete(tags::delete_tag))
}
