//! Role gates.
//!
//! Each extractor decodes the request principal softly and then applies
//! [`taskboard_core::access::require_role`]. Use them as handler
//! parameters to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskboard_core::access::{require_role, Principal};
use taskboard_core::error::CoreError;
use taskboard_core::types::{DbId, Role};

use super::auth::MaybePrincipal;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated user behind a passed role gate.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub name: String,
    pub role: Role,
}

/// Requires a user principal with role admin or employee. Anonymous
/// requests and viewer capabilities are rejected with 401.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybePrincipal(principal) =
            MaybePrincipal::from_request_parts(parts, state).await?;
        require_role(principal.as_ref(), &[Role::Admin, Role::Employee])?;
        Ok(RequireStaff(into_auth_user(principal)?))
    }
}

/// Requires the admin role. Rejects non-admin users with 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybePrincipal(principal) =
            MaybePrincipal::from_request_parts(parts, state).await?;
        require_role(principal.as_ref(), &[Role::Admin])?;
        Ok(RequireAdmin(into_auth_user(principal)?))
    }
}

/// Unwrap a principal that `require_role` already vetted as a user.
fn into_auth_user(principal: Option<Principal>) -> Result<AuthUser, AppError> {
    match principal {
        Some(Principal::User { id, name, role }) => Ok(AuthUser {
            user_id: id,
            name,
            role,
        }),
        _ => Err(AppError::Core(CoreError::Unauthorized(
            "auth required".into(),
        ))),
    }
}
