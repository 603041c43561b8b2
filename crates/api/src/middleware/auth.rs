//! Soft-authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use taskboard_core::access::Principal;

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::state::AppState;

/// The decoded principal of a request, if any.
///
/// This extractor never rejects: a missing `Authorization` header, a
/// non-bearer scheme, or an invalid/expired token all yield `None`, and
/// the request proceeds as anonymous. Rejection is the job of the policy
/// gates ([`crate::middleware::rbac`]) and of
/// [`taskboard_core::access::allow_board_view`], which each take the
/// decoded `Option<Principal>` explicitly.
#[derive(Debug, Clone)]
pub struct MaybePrincipal(pub Option<Principal>);

impl FromRequestParts<AppState> for MaybePrincipal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
            .map(str::trim)
            .and_then(|token| verify_token(token, &state.config.jwt));
        Ok(MaybePrincipal(principal))
    }
}
