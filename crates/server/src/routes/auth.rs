//! Authentication route handlers.
//!
//! Passwords are checked by `AuthService`; on success the session id is
//! rotated and the user id stored in it.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use argos_core::Role;

use super::{ApiOk, ok};
use crate::db::UserRepository;
use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::extract::{JsonBody, non_blank};
use crate::middleware::SessionUserId;
use crate::models::{User, session_keys};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

/// Login body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct MessagePayload {
    pub message: &'static str,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiOk<UserPayload>>)> {
    let (Some(email), Some(password), Some(name)) = (
        non_blank(body.email.as_deref()),
        body.password.as_deref().filter(|p| !p.is_empty()),
        non_blank(body.name.as_deref()),
    ) else {
        return Err(AppError::bad_request(
            "Email, password, and name are required",
        ));
    };

    let role = match non_blank(body.role.as_deref()) {
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|_| AppError::bad_request("role must be MANAGER or WORKER"))?,
        None => Role::default(),
    };

    let user = AuthService::new(state.pool())
        .register(email, password, name, role)
        .await?;

    Ok((StatusCode::CREATED, ok(UserPayload { user })))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<ApiOk<UserPayload>>> {
    let (Some(email), Some(password)) = (
        non_blank(body.email.as_deref()),
        body.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::bad_request("Email and password are required"));
    };

    let user = match AuthService::new(state.pool()).login(email, password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "login failed");
            return Err(e.into());
        }
    };

    // Fresh session id on privilege change
    session.cycle_id().await?;
    session.insert(session_keys::USER_ID, user.id).await?;

    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, role = %user.role, "user logged in");

    Ok(ok(UserPayload { user }))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Json<ApiOk<MessagePayload>>> {
    session.flush().await?;
    clear_sentry_user();

    Ok(ok(MessagePayload {
        message: "Logged out successfully",
    }))
}

/// GET /auth/me
///
/// 401 without a session; 404 if the session points at a deleted user.
pub async fn me(
    State(state): State<AppState>,
    SessionUserId(user_id): SessionUserId,
) -> Result<Json<ApiOk<UserPayload>>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(ok(UserPayload { user }))
}
