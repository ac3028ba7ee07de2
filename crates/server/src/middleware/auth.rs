//! Authentication and role extractors.
//!
//! The session only stores the user id. `AuthUser` re-reads the user row on
//! every request, so role changes and deleted accounts take effect at once.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn daily_report(
//!     State(state): State<AppState>,
//!     RequireManager(manager): RequireManager,
//! ) -> Result<Json<...>, AppError> {
//!     ...
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use argos_core::{Role, UserId};

use crate::db::UserRepository;
use crate::error::{AppError, set_sentry_user};
use crate::models::{User, session_keys};
use crate::state::AppState;

/// The user id stored in the session, without touching the database.
///
/// Rejects with 401 when there is no session or it carries no user.
#[derive(Debug, Clone, Copy)]
pub struct SessionUserId(pub UserId);

impl<S> FromRequestParts<S> for SessionUserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(AppError::unauthenticated)?;

        // A session that fails to load is treated as absent.
        let user_id: UserId = session
            .get(session_keys::USER_ID)
            .await
            .ok()
            .flatten()
            .ok_or_else(AppError::unauthenticated)?;

        Ok(Self(user_id))
    }
}

/// The logged-in user, freshly loaded.
///
/// Rejects with 401 when there is no session or the user no longer exists.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionUserId(user_id) = SessionUserId::from_request_parts(parts, state).await?;

        let user = UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await?
            .ok_or_else(AppError::unauthenticated)?;

        set_sentry_user(&user.id, Some(user.email.as_str()));
        Ok(Self(user))
    }
}

async fn require_role(
    parts: &mut Parts,
    state: &AppState,
    role: Role,
    denied: &str,
) -> Result<User, AppError> {
    let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
    if user.role != role {
        tracing::warn!(user_id = %user.id, role = %user.role, required = %role, "role check failed");
        return Err(AppError::forbidden(denied));
    }
    Ok(user)
}

/// A logged-in user with the `MANAGER` role. Otherwise 401 or 403.
#[derive(Debug, Clone)]
pub struct RequireManager(pub User);

impl FromRequestParts<AppState> for RequireManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            Role::Manager,
            "Only managers can access this resource",
        )
        .await
        .map(Self)
    }
}

/// A logged-in user with the `WORKER` role. Otherwise 401 or 403.
#[derive(Debug, Clone)]
pub struct RequireWorker(pub User);

impl FromRequestParts<AppState> for RequireWorker {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require_role(
            parts,
            state,
            Role::Worker,
            "Only workers can access this resource",
        )
        .await
        .map(Self)
    }
}
