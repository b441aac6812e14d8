//! Raw HTTP response as returned by the HTTP client port.

use std::time::Duration;

/// What came back from the network, before any rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase; empty if the transport does not expose one.
    pub status_text: String,
    /// Response headers in receipt order.
    pub headers: Vec<(String, String)>,
    /// Body bytes, or the message of the error raised while reading them.
    pub body: Result<Vec<u8>, String>,
    /// Time from dispatch until the body was read.
    pub duration: Duration,
}

impl HttpResponse {
    /// Creates a response with a fully read body.
    #[must_use]
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            status_text: String::new(),
            headers,
            body: Ok(body),
            duration: Duration::ZERO,
        }
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the `Content-Type` header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns the body length, zero if the body could not be read.
    #[must_use]
    pub fn size(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }
}
