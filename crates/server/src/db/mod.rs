//! Database operations for the Argos `PostgreSQL` schema.
//!
//! # Schema: `argos`
//!
//! ## Tables
//!
//! - `user` - Login accounts with role
//! - `product` - Catalog, soft-disabled via `active`
//! - `shift` - Work sessions; at most one open per user (partial unique index)
//! - `sale` - Append-only sales ledger
//! - `expense` - Append-only expense ledger
//! - `adjustment` - Audit entries pointing at sales or expenses
//!
//! Sessions live in `tower_sessions.session`, owned by the session store.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/`, embedded in
//! [`MIGRATOR`] and run via:
//! ```bash
//! cargo run -p argos-cli -- migrate
//! ```

pub mod adjustments;
pub mod expenses;
pub mod products;
pub mod sales;
pub mod shifts;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use adjustments::AdjustmentRepository;
pub use expenses::ExpenseRepository;
pub use products::ProductRepository;
pub use sales::SaleRepository;
pub use shifts::ShiftRepository;
pub use users::UserRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Constraint violation (e.g., unique email, second open shift).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique violation to `Conflict`, anything else to `Database`.
    pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(message.to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
