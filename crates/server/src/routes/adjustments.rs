//! Adjustment audit trail. Manager-only.
//!
//! Filing an adjustment never modifies the sale or expense it targets.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use argos_core::{AdjustmentKind, AdjustmentTarget, ExpenseId, Money, SaleId};

use super::{ApiOk, ok};
use crate::db::{AdjustmentRepository, ExpenseRepository, SaleRepository};
use crate::error::{AppError, Result};
use crate::extract::{JsonBody, QueryParams, non_blank};
use crate::middleware::RequireManager;
use crate::models::{Adjustment, AdjustmentFilter, AdjustmentWithUser, NewAdjustment};
use crate::services::ledger::adjustment_message;
use crate::state::AppState;

const TARGET_TYPE_ERROR: &str = "targetType must be SALE or EXPENSE";

/// Body for filing an adjustment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdjustmentRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub reason: Option<String>,
    pub target_id: Option<i32>,
    pub target_type: Option<String>,
    pub adjustment_amount: Option<Money>,
}

/// Query string for listing adjustments. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentQuery {
    pub target_id: Option<String>,
    pub target_type: Option<String>,
}

impl AdjustmentQuery {
    fn into_filter(self) -> Result<AdjustmentFilter> {
        let target_id = non_blank(self.target_id.as_deref())
            .map(|raw| {
                raw.parse::<i32>()
                    .map_err(|_| AppError::bad_request("targetId must be an integer"))
            })
            .transpose()?;
        let target_type = non_blank(self.target_type.as_deref())
            .map(|raw| {
                raw.parse::<AdjustmentTarget>()
                    .map_err(|_| AppError::bad_request(TARGET_TYPE_ERROR))
            })
            .transpose()?;

        Ok(AdjustmentFilter {
            target_id,
            target_type,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedAdjustmentPayload {
    pub adjustment: Adjustment,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct AdjustmentsPayload {
    pub adjustments: Vec<AdjustmentWithUser>,
}

/// POST /adjustments
///
/// A reversal records a new amount of zero; a correction records
/// `original + adjustmentAmount`, where the delta defaults to zero.
pub async fn create(
    State(state): State<AppState>,
    RequireManager(manager): RequireManager,
    JsonBody(body): JsonBody<CreateAdjustmentRequest>,
) -> Result<(StatusCode, Json<ApiOk<CreatedAdjustmentPayload>>)> {
    let (Some(kind), Some(reason), Some(target_id), Some(target_type)) = (
        non_blank(body.kind.as_deref()),
        non_blank(body.reason.as_deref()),
        body.target_id,
        non_blank(body.target_type.as_deref()),
    ) else {
        return Err(AppError::bad_request(
            "type, reason, targetId, and targetType are required",
        ));
    };

    let target_type: AdjustmentTarget = target_type
        .parse()
        .map_err(|_| AppError::bad_request(TARGET_TYPE_ERROR))?;
    let kind: AdjustmentKind = kind
        .parse()
        .map_err(|_| AppError::bad_request("type must be reversal or correction"))?;

    let original_amount = match target_type {
        AdjustmentTarget::Sale => SaleRepository::new(state.pool())
            .get(SaleId::new(target_id))
            .await?
            .map(|sale| sale.amount),
        AdjustmentTarget::Expense => ExpenseRepository::new(state.pool())
            .get(ExpenseId::new(target_id))
            .await?
            .map(|expense| expense.amount),
    }
    .ok_or_else(|| AppError::not_found(format!("{target_type} not found")))?;

    let adjustment_amount = body.adjustment_amount.unwrap_or(Money::ZERO);
    let new_amount = kind.apply(original_amount, adjustment_amount);

    let adjustment = AdjustmentRepository::new(state.pool())
        .create(&NewAdjustment {
            kind,
            reason,
            original_amount,
            adjustment_amount,
            new_amount,
            target_id,
            target_type,
            user_id: manager.id,
        })
        .await?;

    tracing::info!(
        adjustment_id = %adjustment.id,
        kind = %kind,
        target_type = %target_type,
        target_id,
        manager_id = %manager.id,
        "adjustment recorded"
    );

    let message = adjustment_message(kind, original_amount, new_amount);
    Ok((
        StatusCode::CREATED,
        ok(CreatedAdjustmentPayload {
            adjustment,
            message,
        }),
    ))
}

/// GET /adjustments?targetId=&targetType=
pub async fn index(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
    QueryParams(query): QueryParams<AdjustmentQuery>,
) -> Result<Json<ApiOk<AdjustmentsPayload>>> {
    let adjustments = AdjustmentRepository::new(state.pool())
        .list(query.into_filter()?)
        .await?;
    Ok(ok(AdjustmentsPayload { adjustments }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(target_id: Option<&str>, target_type: Option<&str>) -> AdjustmentQuery {
        AdjustmentQuery {
            target_id: target_id.map(String::from),
            target_type: target_type.map(String::from),
        }
    }

    #[test]
    fn test_empty_query_values_mean_no_filter() {
        let filter = query(Some(""), Some("")).into_filter().unwrap();
        assert!(filter.target_id.is_none());
        assert!(filter.target_type.is_none());
    }

    #[test]
    fn test_query_filters_parse() {
        let filter = query(Some("17"), Some("EXPENSE")).into_filter().unwrap();
        assert_eq!(filter.target_id, Some(17));
        assert_eq!(filter.target_type, Some(AdjustmentTarget::Expense));
    }

    #[test]
    fn test_bad_query_values_are_rejected() {
        assert!(matches!(
            query(Some("abc"), None).into_filter(),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            query(None, Some("sale")).into_filter(),
            Err(AppError::BadRequest(ref msg)) if msg == TARGET_TYPE_ERROR
        ));
    }

    #[test]
    fn test_request_reads_type_field() {
        let body: CreateAdjustmentRequest = serde_json::from_str(
            r#"{"type": "correction", "reason": "typo", "targetId": 4, "targetType": "SALE", "adjustmentAmount": -30}"#,
        )
        .unwrap();
        assert_eq!(body.kind.as_deref(), Some("correction"));
        assert_eq!(body.target_id, Some(4));
        assert_eq!(body.adjustment_amount, Some(Money::from(-30)));
    }

    #[test]
    fn test_request_rejects_out_of_range_delta() {
        let result = serde_json::from_str::<CreateAdjustmentRequest>(
            r#"{"type": "correction", "reason": "x", "targetId": 1, "targetType": "SALE", "adjustmentAmount": 7e28}"#,
        );
        assert!(result.is_err());
    }
}
