//! HTTP Client port

use std::future::Future;

use antiposta_domain::{RequestErrorKind, request::RequestSpec, response::HttpResponse};
use thiserror::Error;

/// Transport-level failures reported by an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpClientError {
    /// The URL could not be used by the client.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The hostname could not be resolved.
    #[error("Could not resolve host {host}: {message}")]
    DnsError {
        /// Host that failed to resolve
        host: String,
        /// Underlying error
        message: String,
    },

    /// The server refused the connection.
    #[error("Connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host
        host: String,
        /// Target port
        port: u16,
    },

    /// A connection could not be established.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS handshake or certificate failure.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The redirect limit was hit.
    #[error("Too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit
        max: usize,
    },

    /// The body could not be encoded.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

impl HttpClientError {
    /// Returns the display category of this error.
    #[must_use]
    pub const fn to_error_kind(&self) -> RequestErrorKind {
        match self {
            Self::InvalidUrl(_) => RequestErrorKind::InvalidUrl,
            Self::DnsError { .. } => RequestErrorKind::DnsError,
            Self::ConnectionRefused { .. } => RequestErrorKind::ConnectionRefused,
            Self::ConnectionFailed(_) => RequestErrorKind::ConnectionFailed,
            Self::Tls(_) => RequestErrorKind::TlsError,
            Self::TooManyRedirects { .. } => RequestErrorKind::TooManyRedirects,
            Self::InvalidBody(_) => RequestErrorKind::InvalidBody,
            Self::Other(_) => RequestErrorKind::Unknown,
        }
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
pub trait HttpClient: Send + Sync {
    /// Sends a validated request and returns whatever came back.
    ///
    /// Any HTTP status is a successful send. A failure while reading the body
    /// is reported inside [`HttpResponse::body`], not as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if no response was received.
    fn send(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<HttpResponse, HttpClientError>> + Send;
}
