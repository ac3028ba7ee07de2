//! Ledger arithmetic over sales and expenses.
//!
//! Totals are always computed from the rows handed in. Adjustments are audit
//! records only and are not subtracted here.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use argos_core::{AdjustmentKind, Email, Money, UserId};

use crate::models::{Expense, ExpenseWithUser, Sale, SaleWithUser, UserSummary};

/// Totals for a closed shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSummary {
    pub total_expenses: Money,
    pub total_sales: Money,
    /// `total_sales - total_expenses`
    pub profit: Money,
    /// Number of expenses plus number of sales.
    pub transaction_count: usize,
}

impl ShiftSummary {
    /// Summarize the rows linked to a shift.
    #[must_use]
    pub fn from_rows(expenses: &[Expense], sales: &[Sale]) -> Self {
        let total_expenses: Money = expenses.iter().map(|e| e.amount).sum();
        let total_sales: Money = sales.iter().map(|s| s.amount).sum();

        Self {
            total_expenses,
            total_sales,
            profit: total_sales - total_expenses,
            transaction_count: expenses.len() + sales.len(),
        }
    }
}

/// Day-wide totals across all workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub total_expenses: Money,
    pub total_sales: Money,
    pub net_profit: Money,
}

/// One worker's share of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSummary {
    pub user_id: UserId,
    pub name: String,
    pub email: Email,
    pub expenses: Money,
    pub sales: Money,
    pub profit: Money,
}

impl WorkerSummary {
    fn new(user: &UserSummary) -> Self {
        Self {
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            expenses: Money::ZERO,
            sales: Money::ZERO,
            profit: Money::ZERO,
        }
    }
}

/// The manager's daily report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    /// Local calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub summary: ReportTotals,
    pub expenses: Vec<ExpenseWithUser>,
    pub sales: Vec<SaleWithUser>,
    /// Per-worker totals, in order of first appearance scanning expenses and
    /// then sales.
    pub worker_summary: Vec<WorkerSummary>,
}

impl DailyReport {
    /// Aggregate a day's rows.
    #[must_use]
    pub fn build(date: NaiveDate, expenses: Vec<ExpenseWithUser>, sales: Vec<SaleWithUser>) -> Self {
        let total_expenses: Money = expenses.iter().map(|e| e.expense.amount).sum();
        let total_sales: Money = sales.iter().map(|s| s.sale.amount).sum();

        let mut breakdown = WorkerBreakdown::default();
        for row in &expenses {
            breakdown.add_expense(&row.user, row.expense.amount);
        }
        for row in &sales {
            breakdown.add_sale(&row.user, row.sale.amount);
        }

        Self {
            date,
            summary: ReportTotals {
                total_expenses,
                total_sales,
                net_profit: total_sales - total_expenses,
            },
            expenses,
            sales,
            worker_summary: breakdown.into_entries(),
        }
    }
}

/// Insertion-ordered accumulator keyed by user.
#[derive(Debug, Default)]
struct WorkerBreakdown {
    index: HashMap<UserId, usize>,
    entries: Vec<WorkerSummary>,
}

impl WorkerBreakdown {
    fn entry(&mut self, user: &UserSummary) -> &mut WorkerSummary {
        let next = self.entries.len();
        let idx = *self.index.entry(user.id).or_insert(next);
        if idx == next {
            self.entries.push(WorkerSummary::new(user));
        }
        // idx is either an existing position or the one just pushed
        &mut self.entries[idx]
    }

    fn add_expense(&mut self, user: &UserSummary, amount: Money) {
        let entry = self.entry(user);
        entry.expenses += amount;
        entry.profit = entry.sales - entry.expenses;
    }

    fn add_sale(&mut self, user: &UserSummary, amount: Money) {
        let entry = self.entry(user);
        entry.sales += amount;
        entry.profit = entry.sales - entry.expenses;
    }

    fn into_entries(self) -> Vec<WorkerSummary> {
        self.entries
    }
}

/// Confirmation text returned when an adjustment is filed, e.g.
/// `Reversal recorded. Original: $50, New: $0`.
#[must_use]
pub fn adjustment_message(kind: AdjustmentKind, original: Money, new_amount: Money) -> String {
    format!(
        "{} recorded. Original: ${original}, New: ${new_amount}",
        kind.label()
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};

    use argos_core::{ExpenseId, SaleId, ShiftId};

    use super::*;

    fn money(s: &str) -> Money {
        Money::parse(s).unwrap()
    }

    fn ts() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-14T15:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn user(id: i32, name: &str) -> UserSummary {
        UserSummary {
            id: UserId::new(id),
            name: name.to_string(),
            email: Email::parse(&format!("{}@argos.cl", name.to_lowercase())).unwrap(),
        }
    }

    fn expense(id: i32, owner: &UserSummary, amount: &str) -> ExpenseWithUser {
        ExpenseWithUser {
            expense: Expense {
                id: ExpenseId::new(id),
                description: "Insumos".to_string(),
                amount: money(amount),
                category: "Otros".to_string(),
                date: ts(),
                user_id: owner.id,
                shift_id: Some(ShiftId::new(1)),
                created_at: ts(),
            },
            user: owner.clone(),
        }
    }

    fn sale(id: i32, owner: &UserSummary, amount: &str) -> SaleWithUser {
        SaleWithUser {
            sale: Sale {
                id: SaleId::new(id),
                description: "Café".to_string(),
                amount: money(amount),
                date: ts(),
                user_id: owner.id,
                product_id: None,
                shift_id: Some(ShiftId::new(1)),
                created_at: ts(),
            },
            user: owner.clone(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_shift_summary() {
        let carlos = user(2, "Carlos");
        let expenses = vec![expense(1, &carlos, "12.50").expense, expense(2, &carlos, "7.50").expense];
        let sales = vec![
            sale(1, &carlos, "10").sale,
            sale(2, &carlos, "10").sale,
            sale(3, &carlos, "35.25").sale,
        ];

        let summary = ShiftSummary::from_rows(&expenses, &sales);

        assert_eq!(summary.total_expenses, money("20"));
        assert_eq!(summary.total_sales, money("55.25"));
        assert_eq!(summary.profit, money("35.25"));
        assert_eq!(summary.transaction_count, 5);
    }

    #[test]
    fn test_empty_shift_summary() {
        let summary = ShiftSummary::from_rows(&[], &[]);
        assert_eq!(summary.profit, Money::ZERO);
        assert_eq!(summary.transaction_count, 0);
    }

    #[test]
    fn test_daily_report_totals_across_workers() {
        let carlos = user(2, "Carlos");
        let ana = user(3, "Ana");

        let report = DailyReport::build(
            date(),
            vec![expense(1, &carlos, "30"), expense(2, &ana, "5")],
            vec![sale(1, &ana, "100"), sale(2, &carlos, "20.10")],
        );

        assert_eq!(report.summary.total_expenses, money("35"));
        assert_eq!(report.summary.total_sales, money("120.10"));
        assert_eq!(report.summary.net_profit, money("85.10"));
        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.sales.len(), 2);
    }

    #[test]
    fn test_worker_breakdown_order_is_first_appearance() {
        let carlos = user(2, "Carlos");
        let ana = user(3, "Ana");
        let luis = user(4, "Luis");

        // Luis only sells, so he comes after everyone who had an expense
        let report = DailyReport::build(
            date(),
            vec![expense(1, &ana, "10"), expense(2, &carlos, "4"), expense(3, &ana, "1")],
            vec![sale(1, &luis, "50"), sale(2, &carlos, "9")],
        );

        let ids: Vec<i32> = report
            .worker_summary
            .iter()
            .map(|w| w.user_id.as_i32())
            .collect();
        assert_eq!(ids, vec![3, 2, 4]);

        let ana_row = &report.worker_summary[0];
        assert_eq!(ana_row.expenses, money("11"));
        assert_eq!(ana_row.sales, Money::ZERO);
        assert_eq!(ana_row.profit, money("-11"));

        let carlos_row = &report.worker_summary[1];
        assert_eq!(carlos_row.expenses, money("4"));
        assert_eq!(carlos_row.sales, money("9"));
        assert_eq!(carlos_row.profit, money("5"));

        let luis_row = &report.worker_summary[2];
        assert_eq!(luis_row.profit, money("50"));
        assert_eq!(luis_row.name, "Luis");
    }

    #[test]
    fn test_empty_day() {
        let report = DailyReport::build(date(), vec![], vec![]);
        assert_eq!(report.summary.net_profit, Money::ZERO);
        assert!(report.worker_summary.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let carlos = user(2, "Carlos");
        let report = DailyReport::build(date(), vec![], vec![sale(1, &carlos, "10")]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["date"], "2026-03-14");
        assert_eq!(json["summary"]["netProfit"], 10.0);
        assert_eq!(json["sales"][0]["user"]["email"], "carlos@argos.cl");
        assert_eq!(json["sales"][0]["userId"], 2);
        assert_eq!(json["workerSummary"][0]["userId"], 2);
        assert_eq!(json["workerSummary"][0]["sales"], 10.0);
    }

    #[test]
    fn test_adjustment_message() {
        assert_eq!(
            adjustment_message(AdjustmentKind::Reversal, money("50.00"), Money::ZERO),
            "Reversal recorded. Original: $50, New: $0"
        );
        assert_eq!(
            adjustment_message(AdjustmentKind::Correction, money("100"), money("70")),
            "Correction recorded. Original: $100, New: $70"
        );
    }
}
