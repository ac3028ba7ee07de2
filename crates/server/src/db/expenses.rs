//! Expense repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use argos_core::{Email, ExpenseId, ShiftId, UserId};

use super::RepositoryError;
use crate::models::{Expense, ExpenseWithUser, NewExpense, UserSummary};

/// An expense joined with its owner's name and email.
#[derive(Debug, sqlx::FromRow)]
struct ExpenseWithUserRow {
    #[sqlx(flatten)]
    expense: Expense,
    user_name: String,
    user_email: Email,
}

impl From<ExpenseWithUserRow> for ExpenseWithUser {
    fn from(row: ExpenseWithUserRow) -> Self {
        let user = UserSummary {
            id: row.expense.user_id,
            name: row.user_name,
            email: row.user_email,
        };
        Self {
            expense: row.expense,
            user,
        }
    }
}

/// Repository for the expense ledger.
pub struct ExpenseRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ExpenseRepository<'a> {
    /// Create a new expense repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record an expense.
    ///
    /// With a `shift_id` the row is only written if that shift belongs to the
    /// same user and is still open; otherwise `None` is returned. The shift row
    /// is share-locked, so a concurrent close either waits for this insert or
    /// makes it fail.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, new: &NewExpense<'_>) -> Result<Option<Expense>, RepositoryError> {
        let expense = sqlx::query_as::<_, Expense>(
            r"
            INSERT INTO argos.expense (description, amount, category, date, user_id, shift_id)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE $6::INTEGER IS NULL
               OR EXISTS (
                   SELECT 1 FROM argos.shift
                   WHERE id = $6 AND user_id = $5 AND NOT closed
                   FOR SHARE
               )
            RETURNING id, description, amount, category, date, user_id, shift_id, created_at
            ",
        )
        .bind(new.description)
        .bind(new.amount)
        .bind(new.category)
        .bind(new.date)
        .bind(new.user_id)
        .bind(new.shift_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(expense)
    }

    /// Get an expense by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ExpenseId) -> Result<Option<Expense>, RepositoryError> {
        let expense = sqlx::query_as::<_, Expense>(
            r"
            SELECT id, description, amount, category, date, user_id, shift_id, created_at
            FROM argos.expense
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(expense)
    }

    /// List one user's expenses dated within `[from, to]`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user_between(
        &self,
        user_id: UserId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Expense>, RepositoryError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r"
            SELECT id, description, amount, category, date, user_id, shift_id, created_at
            FROM argos.expense
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;

        Ok(expenses)
    }

    /// List every user's expenses dated within `[from, to]` with their
    /// owners, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_between_with_user(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ExpenseWithUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, ExpenseWithUserRow>(
            r"
            SELECT e.id, e.description, e.amount, e.category, e.date, e.user_id,
                   e.shift_id, e.created_at,
                   u.name AS user_name, u.email AS user_email
            FROM argos.expense e
            JOIN argos.user u ON u.id = e.user_id
            WHERE e.date >= $1 AND e.date <= $2
            ORDER BY e.created_at DESC, e.id DESC
            ",
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List the expenses recorded against a shift, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_shift(&self, shift_id: ShiftId) -> Result<Vec<Expense>, RepositoryError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r"
            SELECT id, description, amount, category, date, user_id, shift_id, created_at
            FROM argos.expense
            WHERE shift_id = $1
            ORDER BY created_at, id
            ",
        )
        .bind(shift_id)
        .fetch_all(self.pool)
        .await?;

        Ok(expenses)
    }
}
