//! Sale repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use argos_core::{Email, SaleId, ShiftId, UserId};

use super::RepositoryError;
use crate::models::{NewSale, Sale, SaleWithUser, UserSummary};

/// A sale joined with its owner's name and email.
#[derive(Debug, sqlx::FromRow)]
struct SaleWithUserRow {
    #[sqlx(flatten)]
    sale: Sale,
    user_name: String,
    user_email: Email,
}

impl From<SaleWithUserRow> for SaleWithUser {
    fn from(row: SaleWithUserRow) -> Self {
        let user = UserSummary {
            id: row.sale.user_id,
            name: row.user_name,
            email: row.user_email,
        };
        Self {
            sale: row.sale,
            user,
        }
    }
}

/// Repository for the sales ledger.
pub struct SaleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SaleRepository<'a> {
    /// Create a new sale repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a sale.
    ///
    /// With a `shift_id` the row is only written if that shift belongs to the
    /// same user and is still open; otherwise `None` is returned. The shift row
    /// is share-locked, so a concurrent close either waits for this insert or
    /// makes it fail.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewSale<'_>) -> Result<Option<Sale>, RepositoryError> {
        let sale = sqlx::query_as::<_, Sale>(
            r"
            INSERT INTO argos.sale (description, amount, date, user_id, product_id, shift_id)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE $6::INTEGER IS NULL
               OR EXISTS (
                   SELECT 1 FROM argos.shift
                   WHERE id = $6 AND user_id = $4 AND NOT closed
                   FOR SHARE
               )
            RETURNING id, description, amount, date, user_id, product_id, shift_id, created_at
            ",
        )
        .bind(new.description)
        .bind(new.amount)
        .bind(new.date)
        .bind(new.user_id)
        .bind(new.product_id)
        .bind(new.shift_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(sale)
    }

    /// Get a sale by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: SaleId) -> Result<Option<Sale>, RepositoryError> {
        let sale = sqlx::query_as::<_, Sale>(
            r"
            SELECT id, description, amount, date, user_id, product_id, shift_id, created_at
            FROM argos.sale
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(sale)
    }

    /// List one user's sales dated within `[from, to]`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Sale>, RepositoryError> {
        let sales = sqlx::query_as::<_, Sale>(
            r"
            SELECT id, description, amount, date, user_id, product_id, shift_id, created_at
            FROM argos.sale
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;

        Ok(sales)
    }

    /// List every user's sales dated within `[from, to]` with their owners,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_between_with_user(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<SaleWithUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, SaleWithUserRow>(
            r"
            SELECT s.id, s.description, s.amount, s.date, s.user_id, s.product_id,
                   s.shift_id, s.created_at,
                   u.name AS user_name, u.email AS user_email
            FROM argos.sale s
            JOIN argos.user u ON u.id = s.user_id
            WHERE s.date >= $1 AND s.date <= $2
            ORDER BY s.created_at DESC, s.id DESC
            ",
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List the sales recorded against a shift, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shift(&self, shift_id: ShiftId) -> Result<Vec<Sale>, RepositoryError> {
        let sales = sqlx::query_as::<_, Sale>(
            r"
            SELECT id, description, amount, date, user_id, product_id, shift_id, created_at
            FROM argos.sale
            WHERE shift_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(shift_id)
        .fetch_all(self.pool)
        .await?;

        Ok(sales)
    }
}
