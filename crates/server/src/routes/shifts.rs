//! Shift route handlers. Worker-only.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use argos_core::ShiftId;

use super::{ApiOk, ok};
use crate::db::{ExpenseRepository, RepositoryError, SaleRepository, ShiftRepository};
use crate::error::{AppError, Result};
use crate::extract::PathParam;
use crate::middleware::RequireWorker;
use crate::models::{Expense, Sale, Shift};
use crate::services::ledger::ShiftSummary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ShiftPayload {
    pub shift: Shift,
}

#[derive(Debug, Serialize)]
pub struct CurrentShiftPayload {
    pub shift: Option<Shift>,
}

/// A closed shift with the rows recorded against it.
#[derive(Debug, Serialize)]
pub struct ClosedShift {
    #[serde(flatten)]
    pub shift: Shift,
    pub expenses: Vec<Expense>,
    pub sales: Vec<Sale>,
}

#[derive(Debug, Serialize)]
pub struct ClosedShiftPayload {
    pub shift: ClosedShift,
    pub summary: ShiftSummary,
}

/// GET /shifts
///
/// The caller's open shift, or `null`.
pub async fn current(
    State(state): State<AppState>,
    RequireWorker(worker): RequireWorker,
) -> Result<Json<ApiOk<CurrentShiftPayload>>> {
    let shift = ShiftRepository::new(state.pool())
        .get_open_for_user(worker.id)
        .await?;
    Ok(ok(CurrentShiftPayload { shift }))
}

/// POST /shifts
pub async fn open(
    State(state): State<AppState>,
    RequireWorker(worker): RequireWorker,
) -> Result<(StatusCode, Json<ApiOk<ShiftPayload>>)> {
    let shift = ShiftRepository::new(state.pool())
        .open(worker.id, state.clock().now())
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AppError::conflict("You already have an active shift"),
            other => other.into(),
        })?;

    tracing::info!(shift_id = %shift.id, user_id = %worker.id, "shift opened");
    Ok((StatusCode::CREATED, ok(ShiftPayload { shift })))
}

/// PATCH /shifts/{id}/close
pub async fn close(
    State(state): State<AppState>,
    RequireWorker(worker): RequireWorker,
    PathParam(id): PathParam<ShiftId>,
) -> Result<Json<ApiOk<ClosedShiftPayload>>> {
    let shifts = ShiftRepository::new(state.pool());

    let shift = shifts
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Shift not found"))?;
    if !shift.is_owned_by(worker.id) {
        return Err(AppError::forbidden("You can only close your own shifts"));
    }
    if shift.closed {
        return Err(AppError::conflict("Shift is already closed"));
    }

    // Lost a race with another close of the same shift
    let shift = shifts
        .close(id, state.clock().now())
        .await?
        .ok_or_else(|| AppError::conflict("Shift is already closed"))?;

    let expenses = ExpenseRepository::new(state.pool()).list_for_shift(id).await?;
    let sales = SaleRepository::new(state.pool()).list_for_shift(id).await?;
    let summary = ShiftSummary::from_rows(&expenses, &sales);

    tracing::info!(
        shift_id = %shift.id,
        user_id = %worker.id,
        total_sales = %summary.total_sales,
        total_expenses = %summary.total_expenses,
        "shift closed"
    );

    Ok(ok(ClosedShiftPayload {
        shift: ClosedShift {
            shift,
            expenses,
            sales,
        },
        summary,
    }))
}

/// Rejection for a `shiftId` the caller cannot record against.
pub(crate) const INVALID_SHIFT: &str = "Invalid or closed shift";
