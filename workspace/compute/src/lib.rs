//! Pure computations over salary cycles: the savings allocation engine and
//! the analytics aggregator. Nothing in here touches the database.

pub mod allocation;
pub mod analytics;
pub mod error;
pub mod rounding;

pub use allocation::recommend;
pub use analytics::{current_analytics, historical_cycle};
