//! Principal model and authorization decisions.
//!
//! A verified token yields a [`Principal`]; a missing or invalid token
//! yields `None` (anonymous). Handlers pass `Option<&Principal>` into the
//! decision functions here -- there is no ambient request-scoped identity.

use crate::error::CoreError;
use crate::types::{DbId, Role};

/// The identity carried by a verified capability token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// A logged-in user with an organization-wide role.
    User { id: DbId, name: String, role: Role },
    /// A share-link capability granting read access to exactly one board,
    /// addressed by its opaque external id.
    Viewer { board_key: String },
}

/// Role gate: requires a user principal whose role is in `allowed`.
///
/// No principal at all, or a viewer capability, is `Unauthorized`; a user
/// principal with the wrong role is `Forbidden`.
pub fn require_role(
    principal: Option<&Principal>,
    allowed: &[Role],
) -> Result<(), CoreError> {
    match principal {
        Some(Principal::User { role, .. }) => {
            if allowed.contains(role) {
                Ok(())
            } else {
                Err(CoreError::Forbidden("forbidden".into()))
            }
        }
        Some(Principal::Viewer { .. }) | None => {
            Err(CoreError::Unauthorized("auth required".into()))
        }
    }
}

/// Board-scoped read gate for operations keyed by a board's external id.
///
/// Anonymous requests are allowed (public read). A user principal of any
/// role is allowed. A viewer capability is allowed only for the board it
/// was issued for.
pub fn allow_board_view(
    principal: Option<&Principal>,
    board_key: &str,
) -> Result<(), CoreError> {
    match principal {
        None | Some(Principal::User { .. }) => Ok(()),
        Some(Principal::Viewer { board_key: bound }) => {
            if bound == board_key {
                Ok(())
            } else {
                Err(CoreError::Forbidden(
                    "viewer token not for this board".into(),
                ))
            }
        }
    }
}
