use axum::routing::post;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// ```text
/// POST /cards/{cardid}/comments -> create_comment
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/cards/{cardid}/comments", post(comments::create_comment))
}
