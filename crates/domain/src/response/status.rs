//! HTTP status line types

use std::fmt;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns the canonical reason phrase for common status codes.
    ///
    /// Used when the server sent none.
    #[must_use]
    pub const fn reason_phrase(self) -> &'static str {
        match self.0 {
            100 => "Continue",
            101 => "Switching Protocols",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "",
        }
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Whether a status line renders as success or error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutcome {
    /// 2xx
    Success,
    /// Anything else, including transport failures
    Error,
}

impl StatusOutcome {
    /// Returns the class string of the status element.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Success => "status success",
            Self::Error => "status error",
        }
    }
}

/// The rendered status line of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Numeric code
    pub code: u16,
    /// Reason phrase
    pub text: String,
    /// Success for 200..=299
    pub outcome: StatusOutcome,
}

impl StatusLine {
    /// Builds a status line from a code and the server's reason phrase.
    #[must_use]
    pub fn new(code: impl Into<StatusCode>, text: impl Into<String>) -> Self {
        let code = code.into();
        let text = text.into();
        let text = if text.is_empty() {
            code.reason_phrase().to_string()
        } else {
            text
        };
        Self {
            code: code.as_u16(),
            text,
            outcome: if code.is_success() {
                StatusOutcome::Success
            } else {
                StatusOutcome::Error
            },
        }
    }

    /// Returns the class string of the status element.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        self.outcome.class()
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.text)
        }
    }
}
