//! Expense route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use argos_core::{Money, ShiftId};

use super::shifts::INVALID_SHIFT;
use super::{ApiOk, ok};
use crate::db::ExpenseRepository;
use crate::error::{AppError, Result};
use crate::extract::{JsonBody, non_blank};
use crate::middleware::AuthUser;
use crate::models::{Expense, NewExpense, expense::DEFAULT_CATEGORY};
use crate::state::AppState;

/// Body for recording an expense.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub shift_id: Option<ShiftId>,
}

#[derive(Debug, Serialize)]
pub struct ExpensePayload {
    pub expense: Expense,
}

#[derive(Debug, Serialize)]
pub struct ExpensesPayload {
    pub expenses: Vec<Expense>,
    pub total: Money,
}

/// GET /expenses
///
/// The caller's expenses since local midnight, newest first.
pub async fn index(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiOk<ExpensesPayload>>> {
    let today = state.clock().day_window();
    let expenses = ExpenseRepository::new(state.pool())
        .list_for_user_between(user.id, today.from, today.to)
        .await?;
    let total = expenses.iter().map(|e| e.amount).sum();

    Ok(ok(ExpensesPayload { expenses, total }))
}

/// POST /expenses
///
/// Unlike a sale, an expense of zero is rejected.
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    JsonBody(body): JsonBody<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ApiOk<ExpensePayload>>)> {
    let (Some(description), Some(amount)) = (
        non_blank(body.description.as_deref()),
        body.amount.filter(|a| !a.is_zero()),
    ) else {
        return Err(AppError::bad_request("Description and amount are required"));
    };
    let category = non_blank(body.category.as_deref()).unwrap_or(DEFAULT_CATEGORY);

    let expense = ExpenseRepository::new(state.pool())
        .create(&NewExpense {
            description,
            amount,
            category,
            date: state.clock().now(),
            user_id: user.id,
            shift_id: body.shift_id,
        })
        .await?
        .ok_or_else(|| AppError::bad_request(INVALID_SHIFT))?;

    tracing::info!(
        expense_id = %expense.id,
        user_id = %user.id,
        amount = %expense.amount,
        category = %expense.category,
        "expense recorded"
    );
    Ok((StatusCode::CREATED, ok(ExpensePayload { expense })))
}
