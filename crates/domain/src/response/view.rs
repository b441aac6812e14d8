//! Rendered form of a response, as shown in the response pane.

use std::time::Duration;

use super::{HttpResponse, StatusLine};

/// The response body as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    /// JSON content type; pretty-printed with two-space indentation.
    Json {
        /// Pretty-printed text
        pretty: String,
        /// Parsed document
        value: serde_json::Value,
    },
    /// Any other content type, shown as-is.
    Text(String),
    /// The body could not be read or parsed.
    Error {
        /// Message shown in the body pane
        message: String,
        /// Raw body text, if it was read
        raw: Option<String>,
    },
}

impl BodyView {
    /// Returns the text to put in the body pane.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Json { pretty, .. } => pretty,
            Self::Text(text) => text,
            Self::Error { message, .. } => message,
        }
    }

    /// Returns true if rendering the body failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// A completed response ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseView {
    /// Status line
    pub status: StatusLine,
    /// Headers in receipt order
    pub headers: Vec<(String, String)>,
    /// Body
    pub body: BodyView,
    /// Body size in bytes
    pub size: usize,
    /// Round-trip time
    pub duration: Duration,
}

impl ResponseView {
    /// Renders a raw response.
    ///
    /// Failures while reading or parsing the body only affect [`BodyView`];
    /// status and headers are always kept.
    #[must_use]
    pub fn from_response(response: &HttpResponse) -> Self {
        let body = match &response.body {
            Err(message) => BodyView::Error {
                message: format!("Error parsing response: {message}"),
                raw: None,
            },
            Ok(bytes) => render_body(response.content_type(), bytes),
        };

        Self {
            status: StatusLine::new(response.status, response.status_text.clone()),
            headers: response.headers.clone(),
            body,
            size: response.size(),
            duration: response.duration,
        }
    }

    /// Returns one `name: value` line per header, in receipt order.
    #[must_use]
    pub fn header_lines(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect()
    }

    /// Returns a human-readable size string (e.g., "1.20 KB").
    #[must_use]
    pub fn size_display(&self) -> String {
        format_bytes(self.size)
    }

    /// Returns a human-readable duration string (e.g., "124 ms").
    #[must_use]
    pub fn duration_display(&self) -> String {
        let millis = self.duration.as_millis();
        if millis < 1000 {
            format!("{millis} ms")
        } else {
            format!("{:.2} s", self.duration.as_secs_f64())
        }
    }
}

/// Returns true for `application/json` and any `+json` suffix.
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type.parse::<mime::Mime>().is_ok_and(|m| {
        m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON)
    })
}

fn render_body(content_type: Option<&str>, bytes: &[u8]) -> BodyView {
    let text = String::from_utf8_lossy(bytes);

    if bytes.is_empty() || !content_type.is_some_and(is_json_content_type) {
        return BodyView::Text(text.into_owned());
    }

    let pretty = serde_json::from_slice::<serde_json::Value>(bytes).and_then(|value| {
        serde_json::to_string_pretty(&value).map(|pretty| (pretty, value))
    });

    match pretty {
        Ok((pretty, value)) => BodyView::Json { pretty, value },
        Err(e) => BodyView::Error {
            message: format!("Error parsing response: {e}"),
            raw: Some(text.into_owned()),
        },
    }
}

/// Formats bytes into a human-readable string.
fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    #[allow(clippy::cast_precision_loss)]
    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
