//! Handler for the member directory.

use axum::extract::State;
use axum::Json;

use taskboard_db::models::user::MemberRef;
use taskboard_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

/// GET /members
pub async fn list_members(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<MemberRef>>> {
    let members = UserRepo::list_members(&state.pool).await?;
    Ok(Json(members))
}
