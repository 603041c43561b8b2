use axum::routing::{delete, patch, post, put};
use axum::Router;

use crate::handlers::cards;
use crate::state::AppState;

/// ```text
/// POST   /lists/{listid}/cards -> create_card
/// PATCH  /cards/move           -> move_card
/// PUT    /cards/{cardid}       -> update_card (multipart)
/// DELETE /cards/{cardid}       -> delete_card
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lists/{listid}/cards", post(cards::create_card))
        .route("/cards/move", patch(cards::move_card))
        .route(
            "/cards/{cardid}",
            put(cards::update_card).delete(cards::delete_card),
        )
}
