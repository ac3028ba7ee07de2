//! Expense ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;

use argos_core::{ExpenseId, Money, ShiftId, UserId};

use super::UserSummary;

/// Category used when the client does not send one.
pub const DEFAULT_CATEGORY: &str = "Otros";

/// A recorded expense. Never edited after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub date: DateTime<Utc>,
    pub user_id: UserId,
    pub shift_id: Option<ShiftId>,
    pub created_at: DateTime<Utc>,
}

/// An expense together with the worker who recorded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseWithUser {
    #[serde(flatten)]
    pub expense: Expense,
    pub user: UserSummary,
}

/// Input for recording an expense.
#[derive(Debug, Clone)]
pub struct NewExpense<'a> {
    pub description: &'a str,
    pub amount: Money,
    pub category: &'a str,
    pub date: DateTime<Utc>,
    pub user_id: UserId,
    pub shift_id: Option<ShiftId>,
}
