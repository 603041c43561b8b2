use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Plain-text liveness probe at the server root.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(|| async { "taskboard backend OK" }))
}
