//! Application error types

use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    /// A storage write did not go through.
    #[error("storage error: {0}")]
    Storage(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
