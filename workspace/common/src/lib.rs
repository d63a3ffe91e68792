//! Common transport-layer types shared between the computing layer and the
//! HTTP handlers. Anything that is serialized to API clients but produced by
//! `compute` lives here so both sides agree on one shape.

mod analytics;
mod categories;
mod recommendation;

pub use analytics::{CycleAnalytics, HistoricalCycle};
pub use categories::{DEFAULT_CATEGORY, EXPENSE_CATEGORIES};
pub use recommendation::AiRecommendation;

use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Spending per category, keyed by the category name as stored on expenses.
pub type ExpenseBreakdown = BTreeMap<String, Decimal>;
