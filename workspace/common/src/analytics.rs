use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Spending overview of the active salary cycle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CycleAnalytics {
    pub cycle_id: i32,
    pub salary_amount: Decimal,
    /// Sum of all expenses logged so far
    pub total_expenses: Decimal,
    /// Salary minus expenses (negative when overspent)
    pub remaining: Decimal,
    /// Share of the salary already spent, in percent with two decimals
    pub spent_percent: Decimal,
    /// Total spent per category
    pub category_breakdown: BTreeMap<String, Decimal>,
    /// Total spent per calendar day (`YYYY-MM-DD`)
    pub daily_spending: BTreeMap<String, Decimal>,
    pub expense_count: usize,
    pub credited_at: NaiveDateTime,
}

/// Summary of a closed salary cycle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalCycle {
    pub cycle_id: i32,
    pub salary_amount: Decimal,
    /// Expenses frozen when the cycle was closed
    pub total_expenses: Decimal,
    /// Savings frozen when the cycle was closed
    pub total_saved: Decimal,
    pub credited_at: NaiveDateTime,
    pub closed_at: Option<NaiveDateTime>,
    /// Total spent per category, computed from the cycle's current expenses
    pub category_breakdown: BTreeMap<String, Decimal>,
    /// Saved share of the salary, in percent with two decimals
    pub savings_rate: Decimal,
}
