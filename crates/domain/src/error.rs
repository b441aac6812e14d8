//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while turning editor state into a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No URL was entered.
    #[error("URL is required")]
    EmptyUrl,

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The JSON body editor holds text that does not parse.
    #[error("Invalid JSON in request body")]
    InvalidJsonBody(String),
}

/// A method or body type name that is not one of the known choices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChoiceError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// The body type is not one of the known kinds.
    #[error("unsupported body type: {0}")]
    UnsupportedBodyType(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
