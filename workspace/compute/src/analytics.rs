//! Spending analytics for the active cycle and for closed cycles.

use std::collections::BTreeMap;

use common::{CycleAnalytics, ExpenseBreakdown, HistoricalCycle};
use model::entities::{expense, salary_cycle};
use rust_decimal::Decimal;
use tracing::{instrument, trace};

use crate::error::{ComputeError, Result};
use crate::rounding::{percent_of, round_two_places};

fn ensure_same_cycle(cycle: &salary_cycle::Model, expenses: &[expense::Model]) -> Result<()> {
    match expenses.iter().find(|e| e.salary_cycle_id != cycle.id) {
        Some(stray) => Err(ComputeError::CycleMismatch {
            expense_id: stray.id,
            expected: cycle.id,
            found: stray.salary_cycle_id,
        }),
        None => Ok(()),
    }
}

/// Total spent per category.
pub fn category_breakdown(expenses: &[expense::Model]) -> ExpenseBreakdown {
    expenses.iter().fold(BTreeMap::new(), |mut acc, e| {
        *acc.entry(e.category.clone()).or_insert(Decimal::ZERO) += e.amount;
        acc
    })
}

/// Total spent per calendar day of `created_at`, keyed `YYYY-MM-DD`.
pub fn daily_spending(expenses: &[expense::Model]) -> BTreeMap<String, Decimal> {
    expenses.iter().fold(BTreeMap::new(), |mut acc, e| {
        let day = e.created_at.format("%Y-%m-%d").to_string();
        *acc.entry(day).or_insert(Decimal::ZERO) += e.amount;
        acc
    })
}

/// Live analytics for a cycle from its expenses.
#[instrument(skip_all, fields(cycle_id = cycle.id, expenses = expenses.len()))]
pub fn current_analytics(
    cycle: &salary_cycle::Model,
    expenses: &[expense::Model],
) -> Result<CycleAnalytics> {
    ensure_same_cycle(cycle, expenses)?;

    let total_expenses: Decimal = expenses.iter().map(|e| e.amount).sum();
    let spent_percent = round_two_places(percent_of(total_expenses, cycle.salary_amount));
    trace!(%total_expenses, %spent_percent, "Computed current analytics");

    Ok(CycleAnalytics {
        cycle_id: cycle.id,
        salary_amount: cycle.salary_amount,
        total_expenses,
        remaining: cycle.salary_amount - total_expenses,
        spent_percent,
        category_breakdown: category_breakdown(expenses),
        daily_spending: daily_spending(expenses),
        expense_count: expenses.len(),
        credited_at: cycle.credited_at,
    })
}

/// Summary of a closed cycle.
///
/// Totals come from the values frozen at close time; only the category
/// breakdown is recomputed from the expenses.
#[instrument(skip_all, fields(cycle_id = cycle.id))]
pub fn historical_cycle(
    cycle: &salary_cycle::Model,
    expenses: &[expense::Model],
) -> Result<HistoricalCycle> {
    if cycle.is_active() {
        return Err(ComputeError::CycleStillActive(cycle.id));
    }
    ensure_same_cycle(cycle, expenses)?;

    let total_saved = cycle.total_saved.unwrap_or(Decimal::ZERO);
    // Math.round(saved / salary * 10000) / 100
    let savings_rate = round_two_places(percent_of(total_saved, cycle.salary_amount));

    Ok(HistoricalCycle {
        cycle_id: cycle.id,
        salary_amount: cycle.salary_amount,
        total_expenses: cycle.total_expenses.unwrap_or(Decimal::ZERO),
        total_saved,
        credited_at: cycle.credited_at,
        closed_at: cycle.closed_at,
        category_breakdown: category_breakdown(expenses),
        savings_rate,
    })
}
