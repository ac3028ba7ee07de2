//! Adjustment audit entries.

use chrono::{DateTime, Utc};
use serde::Serialize;

use argos_core::{AdjustmentId, AdjustmentKind, AdjustmentTarget, Money, UserId};

use super::UserSummary;

/// A manager's reversal or correction of a sale or expense.
///
/// `new_amount` is what the target would be worth after the adjustment; the
/// target row itself keeps its original amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub id: AdjustmentId,
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    pub reason: String,
    pub original_amount: Money,
    pub adjustment_amount: Money,
    pub new_amount: Money,
    pub target_id: i32,
    pub target_type: AdjustmentTarget,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// An adjustment together with the manager who filed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentWithUser {
    #[serde(flatten)]
    pub adjustment: Adjustment,
    pub user: UserSummary,
}

/// Input for filing an adjustment.
#[derive(Debug, Clone)]
pub struct NewAdjustment<'a> {
    pub kind: AdjustmentKind,
    pub reason: &'a str,
    pub original_amount: Money,
    pub adjustment_amount: Money,
    pub new_amount: Money,
    pub target_id: i32,
    pub target_type: AdjustmentTarget,
    pub user_id: UserId,
}

/// Optional filters for listing adjustments.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjustmentFilter {
    pub target_id: Option<i32>,
    pub target_type: Option<AdjustmentTarget>,
}
