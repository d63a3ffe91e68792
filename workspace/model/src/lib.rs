pub mod cycle;
pub mod defaults;
pub mod entities;
pub mod error;
pub mod expenses;
pub mod savings;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ModelError, Result};
