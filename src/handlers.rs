pub mod ai;
pub mod analytics;
pub mod defaults;
pub mod expenses;
pub mod health;
pub mod salary;
