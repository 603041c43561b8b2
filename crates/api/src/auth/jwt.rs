//! Capability-token issue and verification.
//!
//! Tokens are HS256-signed JWTs carrying a [`TokenClaims`] payload. The
//! `typ` claim distinguishes the two capability kinds: a `user` token
//! encodes an identity plus role, a `viewer` token encodes read access to
//! exactly one board, addressed by its opaque external id. Unknown kinds
//! fail decoding, so they cannot be smuggled past the policy layer.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use taskboard_core::access::Principal;
use taskboard_core::types::{DbId, Role};

/// JWT claims embedded in every token, tagged by capability kind.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "typ", rename_all = "lowercase")]
pub enum TokenClaims {
    /// A logged-in user: subject id, display name, and role.
    User {
        sub: DbId,
        name: String,
        role: Role,
        exp: i64,
        iat: i64,
    },
    /// A share-link capability bound to one board's external id.
    Viewer {
        fkboardid: String,
        exp: i64,
        iat: i64,
    },
}

/// Configuration for token signing and verification.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in days (default: 7).
    pub expiry_days: i64,
}

/// Default token expiry in days.
const DEFAULT_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Load token configuration from `JWT_SECRET` (default `change_me`)
    /// and `JWT_EXPIRY_DAYS` (default `7`).
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| "change_me".into());
        let expiry_days: i64 = std::env::var("JWT_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_EXPIRY_DAYS must be a valid i64");
        Self {
            secret,
            expiry_days,
        }
    }
}

/// Issue a user token carrying identity and role.
pub fn issue_user_token(
    user_id: DbId,
    name: &str,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims::User {
        sub: user_id,
        name: name.to_string(),
        role,
        exp: now + config.expiry_days * 86_400,
        iat: now,
    };
    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Issue a viewer token granting read access to exactly one board.
pub fn issue_viewer_token(
    fkboardid: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims::Viewer {
        fkboardid: fkboardid.to_string(),
        exp: now + config.expiry_days * 86_400,
        iat: now,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token and convert its claims into a [`Principal`].
///
/// A bad signature, expired token, or malformed payload yields `None`,
/// never an error: callers treat the request as anonymous and leave any
/// rejection to the policy gates.
pub fn verify_token(token: &str, config: &JwtConfig) -> Option<Principal> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .ok()?;

    Some(match data.claims {
        TokenClaims::User {
            sub, name, role, ..
        } => Principal::User {
            id: sub,
            name,
            role,
        },
        TokenClaims::Viewer { fkboardid, .. } => Principal::Viewer {
            board_key: fkboardid,
        },
    })
}
