//! Adjustment repository. Insert and read only; adjustments are never
//! updated and never touch the rows they target.

use sqlx::PgPool;

use argos_core::Email;

use super::RepositoryError;
use crate::models::{Adjustment, AdjustmentFilter, AdjustmentWithUser, NewAdjustment, UserSummary};

#[derive(Debug, sqlx::FromRow)]
struct AdjustmentWithUserRow {
    #[sqlx(flatten)]
    adjustment: Adjustment,
    user_name: String,
    user_email: Email,
}

impl From<AdjustmentWithUserRow> for AdjustmentWithUser {
    fn from(row: AdjustmentWithUserRow) -> Self {
        let user = UserSummary {
            id: row.adjustment.user_id,
            name: row.user_name,
            email: row.user_email,
        };
        Self {
            adjustment: row.adjustment,
            user,
        }
    }
}

/// Repository for the adjustment audit trail.
pub struct AdjustmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdjustmentRepository<'a> {
    /// Create a new adjustment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// File an adjustment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewAdjustment<'_>) -> Result<Adjustment, RepositoryError> {
        let adjustment = sqlx::query_as::<_, Adjustment>(
            r"
            INSERT INTO argos.adjustment (
                kind, reason, original_amount, adjustment_amount, new_amount,
                target_id, target_type, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, kind, reason, original_amount, adjustment_amount, new_amount,
                      target_id, target_type, user_id, created_at
            ",
        )
        .bind(new.kind)
        .bind(new.reason)
        .bind(new.original_amount)
        .bind(new.adjustment_amount)
        .bind(new.new_amount)
        .bind(new.target_id)
        .bind(new.target_type)
        .bind(new.user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(adjustment)
    }

    /// List adjustments matching the filter, newest first, with the filing
    /// manager attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: AdjustmentFilter,
    ) -> Result<Vec<AdjustmentWithUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdjustmentWithUserRow>(
            r"
            SELECT a.id, a.kind, a.reason, a.original_amount, a.adjustment_amount,
                   a.new_amount, a.target_id, a.target_type, a.user_id, a.created_at,
                   u.name AS user_name, u.email AS user_email
            FROM argos.adjustment a
            JOIN argos.user u ON u.id = a.user_id
            WHERE ($1::INTEGER IS NULL OR a.target_id = $1)
              AND ($2::argos.adjustment_target IS NULL OR a.target_type = $2)
            ORDER BY a.created_at DESC, a.id DESC
            ",
        )
        .bind(filter.target_id)
        .bind(filter.target_type)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
