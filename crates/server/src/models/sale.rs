//! Sales ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;

use argos_core::{Money, ProductId, SaleId, ShiftId, UserId};

use super::UserSummary;

/// A recorded sale. Never edited after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub description: String,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub user_id: UserId,
    pub product_id: Option<ProductId>,
    pub shift_id: Option<ShiftId>,
    pub created_at: DateTime<Utc>,
}

/// A sale together with the worker who recorded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithUser {
    #[serde(flatten)]
    pub sale: Sale,
    pub user: UserSummary,
}

/// Input for recording a sale.
#[derive(Debug, Clone)]
pub struct NewSale<'a> {
    pub description: &'a str,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub user_id: UserId,
    pub product_id: Option<ProductId>,
    pub shift_id: Option<ShiftId>,
}
