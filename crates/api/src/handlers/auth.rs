//! Login handler: verifies credentials and issues a user token.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use taskboard_core::error::CoreError;
use taskboard_core::types::{DbId, Role};
use taskboard_db::repositories::UserRepo;

use crate::auth::{jwt, password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: DbId,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// POST /auth/login
///
/// An unknown email and a wrong password produce the same 401 -- the
/// response must not reveal which one failed.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> AppResult<Json<LoginResponse>> {
    let email = body
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| CoreError::Validation("email and password are required".into()))?;
    let plaintext = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| CoreError::Validation("email and password are required".into()))?;

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let verified = password::verify_password(&plaintext, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("password verification failed: {e}")))?;
    if !verified {
        return Err(invalid_credentials().into());
    }

    let token = jwt::issue_user_token(user.user_id, &user.name, user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("failed to sign token: {e}")))?;

    tracing::info!(user_id = user.user_id, "user logged in");
    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            id: user.user_id,
            name: user.name,
            role: user.role,
        },
    }))
}

fn invalid_credentials() -> CoreError {
    CoreError::Unauthorized("invalid credentials".into())
}
