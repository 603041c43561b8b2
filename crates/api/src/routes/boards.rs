use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::boards;
use crate::state::AppState;

/// Board routes. The bare `/boards/{boardid}` routes address a board by
/// its internal key; the subresource routes (`kanban`, `share`, `close`)
/// address it by the opaque external id shared with viewers. One
/// parameter name is used for both -- the router requires a consistent
/// capture name per segment.
///
/// ```text
/// POST   /boards                   -> create_board
/// PATCH  /boards/{boardid}         -> update_board
/// DELETE /boards/{boardid}         -> delete_board (admin only)
/// GET    /boards/{boardid}/kanban  -> kanban, by external id
///                                     (public, viewer-gated)
/// GET    /boards/{boardid}/share   -> share, by external id
/// PATCH  /boards/{boardid}/close   -> close, by external id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/boards", post(boards::create_board))
        .route(
            "/boards/{boardid}",
            patch(boards::update_board).delete(boards::delete_board),
        )
        .route("/boards/{boardid}/kanban", get(boards::kanban))
        .route("/boards/{boardid}/share", get(boards::share))
        .route("/boards/{boardid}/close", patch(boards::close))
}
