//! Manager reports.

use axum::{Json, extract::State};

use super::{ApiOk, ok};
use crate::clock::DayWindow;
use crate::db::{ExpenseRepository, SaleRepository};
use crate::error::Result;
use crate::middleware::RequireManager;
use crate::services::ledger::DailyReport;
use crate::state::AppState;

/// GET /reports
///
/// Today's sales and expenses across all workers, with per-worker totals.
/// Adjustments are not applied.
pub async fn daily(
    State(state): State<AppState>,
    RequireManager(_manager): RequireManager,
) -> Result<Json<ApiOk<DailyReport>>> {
    // Both queries share the same window
    let DayWindow { from, to, date } = state.clock().day_window();

    let expenses = ExpenseRepository::new(state.pool())
        .list_between_with_user(from, to)
        .await?;
    let sales = SaleRepository::new(state.pool())
        .list_between_with_user(from, to)
        .await?;

    Ok(ok(DailyReport::build(date, expenses, sales)))
}
