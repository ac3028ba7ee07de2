//! Shift repository.
//!
//! The one-open-shift rule is enforced by the `shift_one_open_per_user_idx`
//! partial unique index, and closing is a conditional update, so neither
//! operation reads before it writes.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use argos_core::{ShiftId, UserId};

use super::RepositoryError;
use crate::models::Shift;

/// Repository for shift operations.
pub struct ShiftRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShiftRepository<'a> {
    /// Create a new shift repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a shift by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ShiftId) -> Result<Option<Shift>, RepositoryError> {
        let shift = sqlx::query_as::<_, Shift>(
            r"
            SELECT id, user_id, start_time, end_time, closed, created_at
            FROM argos.shift
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(shift)
    }

    /// Get the user's open shift, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_open_for_user(&self, user_id: UserId) -> Result<Option<Shift>, RepositoryError> {
        let shift = sqlx::query_as::<_, Shift>(
            r"
            SELECT id, user_id, start_time, end_time, closed, created_at
            FROM argos.shift
            WHERE user_id = $1 AND NOT closed
            ORDER BY start_time DESC
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(shift)
    }

    /// Open a shift for the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the user already has an open shift.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn open(
        &self,
        user_id: UserId,
        start_time: DateTime<Utc>,
    ) -> Result<Shift, RepositoryError> {
        sqlx::query_as::<_, Shift>(
            r"
            INSERT INTO argos.shift (user_id, start_time)
            VALUES ($1, $2)
            RETURNING id, user_id, start_time, end_time, closed, created_at
            ",
        )
        .bind(user_id)
        .bind(start_time)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::conflict_on_unique(e, "user already has an open shift"))
    }

    /// Close a shift if it is still open.
    ///
    /// Returns `None` when the shift does not exist or was already closed, so a
    /// racing second close never moves `end_time`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn close(
        &self,
        id: ShiftId,
        end_time: DateTime<Utc>,
    ) -> Result<Option<Shift>, RepositoryError> {
        let shift = sqlx::query_as::<_, Shift>(
            r"
            UPDATE argos.shift
            SET closed = TRUE, end_time = $2
            WHERE id = $1 AND NOT closed
            RETURNING id, user_id, start_time, end_time, closed, created_at
            ",
        )
        .bind(id)
        .bind(end_time)
        .fetch_optional(self.pool)
        .await?;

        Ok(shift)
    }
}
