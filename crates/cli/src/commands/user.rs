//! User management commands.

use argos_core::Role;
use argos_server::services::auth::AuthService;

use super::{CommandError, connect};

/// Create a user with a password.
///
/// # Errors
///
/// Returns an error if the role is invalid, the email is malformed or
/// already registered, or the database is unreachable.
pub async fn create(
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> Result<(), CommandError> {
    let role: Role = role
        .trim()
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| CommandError::InvalidRole(role.to_string()))?;

    let pool = connect().await?;
    let user = AuthService::new(&pool)
        .register(email, password, name, role)
        .await?;

    tracing::info!(user_id = %user.id, email = %user.email, role = %user.role, "User created");
    Ok(())
}
