use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, PartialEq)]
pub enum ComputeError {
    /// An expense was handed in together with a cycle it does not belong to
    #[error("Expense {expense_id} belongs to cycle {found}, expected cycle {expected}")]
    CycleMismatch {
        expense_id: i32,
        expected: i32,
        found: i32,
    },

    /// History can only be built from closed cycles
    #[error("Salary cycle {0} is still active")]
    CycleStillActive(i32),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
