use thiserror::Error;

/// Errors raised by the persistence services.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The operation needs an active salary cycle and there is none
    #[error("No active salary cycle found")]
    NoActiveCycle,

    /// A record referenced by id does not exist
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i32 },
}

/// Type alias for Result with ModelError
pub type Result<T> = std::result::Result<T, ModelError>;
