use axum::routing::get;
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// ```text
/// GET /members -> list_members
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/members", get(members::list_members))
}
