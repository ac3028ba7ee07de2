//! Demo data.
//!
//! Creates one manager and one worker so a fresh database can be logged into
//! straight away. Accounts that already exist are left untouched.

use argos_core::Role;
use argos_server::services::auth::{AuthError, AuthService};

use super::{CommandError, connect};

struct DemoUser {
    email: &'static str,
    password: &'static str,
    name: &'static str,
    role: Role,
}

const DEMO_USERS: [DemoUser; 2] = [
    DemoUser {
        email: "manager@argos.cl",
        password: "manager123",
        name: "Juan Manager",
        role: Role::Manager,
    },
    DemoUser {
        email: "worker@argos.cl",
        password: "worker123",
        name: "Carlos Worker",
        role: Role::Worker,
    },
];

/// Create the demo accounts.
///
/// # Errors
///
/// Returns an error if the database is unreachable.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    let auth = AuthService::new(&pool);

    for demo in &DEMO_USERS {
        match auth
            .register(demo.email, demo.password, demo.name, demo.role)
            .await
        {
            Ok(user) => tracing::info!(email = demo.email, user_id = %user.id, "Created demo user"),
            Err(AuthError::UserAlreadyExists) => {
                tracing::info!(email = demo.email, "Demo user already exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("Seed complete!");
    Ok(())
}
