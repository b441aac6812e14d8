//! Request execution state types for UI binding.
//!
//! This module defines the state machine for request execution,
//! enabling the response pane to display appropriate feedback at each stage.

use std::time::{Duration, Instant};

use crate::response::{ResponseView, StatusOutcome};

/// Represents the current state of a panel's last send.
///
/// - `Idle`: nothing sent yet
/// - `Loading`: request in flight, status shows "Sending..."
/// - `Success`: a response arrived (any status code)
/// - `Error`: validation or transport failure, status shows "Error"
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// No request has been sent yet.
    #[default]
    Idle,

    /// Request is in progress.
    Loading {
        /// When the request started (for elapsed time display).
        started_at: Instant,
    },

    /// A response was received.
    Success {
        /// The rendered response.
        response: Box<ResponseView>,
    },

    /// Request failed with an error.
    Error {
        /// Error category for display.
        kind: RequestErrorKind,
        /// Human-readable error message.
        message: String,
        /// Optional technical details.
        details: Option<String>,
    },
}

impl RequestState {
    /// Creates a new Loading state with the current timestamp.
    #[must_use]
    pub fn loading() -> Self {
        Self::Loading {
            started_at: Instant::now(),
        }
    }

    /// Creates a Success state from a response.
    #[must_use]
    pub fn success(response: ResponseView) -> Self {
        Self::Success {
            response: Box::new(response),
        }
    }

    /// Creates an Error state.
    #[must_use]
    pub fn error(kind: RequestErrorKind, message: impl Into<String>) -> Self {
        Self::Error {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an Error state with details.
    #[must_use]
    pub fn error_with_details(
        kind: RequestErrorKind,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::Error {
            kind,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Returns true if the state is Idle.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a request is in progress.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Returns true if a response was received.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns true if the last request failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Returns the response if in Success state.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseView> {
        match self {
            Self::Success { response } => Some(response),
            _ => None,
        }
    }

    /// Returns the elapsed time if loading.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            Self::Loading { started_at } => Some(started_at.elapsed()),
            _ => None,
        }
    }

    /// Returns the text of the status element.
    #[must_use]
    pub fn status_text(&self) -> String {
        match self {
            Self::Idle => String::new(),
            Self::Loading { .. } => "Sending...".to_string(),
            Self::Success { response } => response.status.to_string(),
            Self::Error { .. } => "Error".to_string(),
        }
    }

    /// Returns the class string of the status element.
    #[must_use]
    pub fn status_class(&self) -> &'static str {
        match self {
            Self::Idle | Self::Loading { .. } => "status",
            Self::Success { response } => response.status.class(),
            Self::Error { .. } => StatusOutcome::Error.class(),
        }
    }

    /// Returns the text of the response body pane.
    #[must_use]
    pub fn body_text(&self) -> &str {
        match self {
            Self::Idle | Self::Loading { .. } => "",
            Self::Success { response } => response.body.display_text(),
            Self::Error { message, .. } => message,
        }
    }
}

/// Categories of request errors for user-friendly display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    /// Empty or malformed URL.
    InvalidUrl,

    /// DNS resolution failed.
    DnsError,

    /// Could not establish connection.
    ConnectionFailed,

    /// Connection was refused by the server.
    ConnectionRefused,

    /// TLS/SSL error.
    TlsError,

    /// Invalid request body (e.g., malformed JSON).
    InvalidBody,

    /// Too many redirects.
    TooManyRedirects,

    /// Unknown or unexpected error.
    Unknown,
}

impl RequestErrorKind {
    /// Returns a human-readable title for this error type.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidUrl => "Invalid URL",
            Self::DnsError => "DNS Resolution Failed",
            Self::ConnectionFailed => "Connection Failed",
            Self::ConnectionRefused => "Connection Refused",
            Self::TlsError => "SSL/TLS Error",
            Self::InvalidBody => "Invalid Request Body",
            Self::TooManyRedirects => "Too Many Redirects",
            Self::Unknown => "Unknown Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::HttpResponse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_state_idle() {
        let state = RequestState::Idle;
        assert!(state.is_idle());
        assert!(!state.is_loading());
        assert!(!state.is_success());
        assert!(!state.is_error());
        assert_eq!(state.status_text(), "");
    }

    #[test]
    fn test_request_state_loading() {
        let state = RequestState::loading();
        assert!(state.is_loading());
        assert!(state.elapsed().is_some());
        assert_eq!(state.status_text(), "Sending...");
        assert_eq!(state.body_text(), "");
    }

    #[test]
    fn test_request_state_success() {
        let view = ResponseView::from_response(&HttpResponse::new(404, vec![], b"gone".to_vec()));
        let state = RequestState::success(view);

        assert!(state.is_success());
        assert_eq!(state.response().map(|r| r.status.code), Some(404));
        assert_eq!(state.status_text(), "404 Not Found");
        assert_eq!(state.status_class(), "status error");
        assert_eq!(state.body_text(), "gone");
    }

    #[test]
    fn test_request_state_error() {
        let state = RequestState::error_with_details(
            RequestErrorKind::ConnectionRefused,
            "Connection refused",
            "tcp connect error",
        );

        assert!(state.is_error());
        assert_eq!(state.status_text(), "Error");
        assert_eq!(state.status_class(), "status error");
        assert_eq!(state.body_text(), "Connection refused");
        if let RequestState::Error { details, .. } = state {
            assert_eq!(details.as_deref(), Some("tcp connect error"));
        }
    }

    #[test]
    fn test_error_kind_title() {
        assert_eq!(RequestErrorKind::InvalidUrl.title(), "Invalid URL");
        assert_eq!(RequestErrorKind::TooManyRedirects.title(), "Too Many Redirects");
    }
}
