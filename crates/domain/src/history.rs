//! Request History Domain Model
//!
//! Defines the structure for tracking executed requests.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::request::HttpMethod;

/// A single entry in the request history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier for this entry.
    pub id: String,
    /// When the request was executed.
    pub timestamp: DateTime<Utc>,
    /// HTTP method used.
    pub method: HttpMethod,
    /// The request URL, including appended query parameters.
    pub url: String,
    /// Response status code (if a response arrived).
    #[serde(default)]
    pub status_code: Option<u16>,
    /// Request duration in milliseconds.
    #[serde(default)]
    pub duration_ms: Option<u64>,
    /// Title of the tab the request was sent from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_name: Option<String>,
    /// Transport error message for failed requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HistoryEntry {
    /// Creates a history entry for a request that got a response.
    #[must_use]
    pub fn completed(
        method: HttpMethod,
        url: impl Into<String>,
        status_code: u16,
        duration_ms: u64,
    ) -> Self {
        Self {
            id: crate::generate_id(),
            timestamp: Utc::now(),
            method,
            url: url.into(),
            status_code: Some(status_code),
            duration_ms: Some(duration_ms),
            request_name: None,
            error: None,
        }
    }

    /// Creates a history entry for a request that failed in transport.
    #[must_use]
    pub fn failed(method: HttpMethod, url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: crate::generate_id(),
            timestamp: Utc::now(),
            method,
            url: url.into(),
            status_code: None,
            duration_ms: None,
            request_name: None,
            error: Some(error.into()),
        }
    }

    /// Sets the request name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.request_name = Some(name.into());
        self
    }

    /// Returns a human-readable "time ago" string.
    #[must_use]
    pub fn time_ago(&self) -> String {
        let now = Utc::now();
        let duration = now.signed_duration_since(self.timestamp);

        if duration.num_seconds() < 60 {
            "just now".to_string()
        } else if duration.num_minutes() < 60 {
            let mins = duration.num_minutes();
            format!("{mins}m ago")
        } else if duration.num_hours() < 24 {
            let hours = duration.num_hours();
            format!("{hours}h ago")
        } else if duration.num_days() < 7 {
            let days = duration.num_days();
            format!("{days}d ago")
        } else {
            self.timestamp.format("%Y-%m-%d").to_string()
        }
    }

    /// Returns the duration as a display string.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_display(&self) -> String {
        match self.duration_ms {
            Some(ms) if ms < 1000 => format!("{ms}ms"),
            Some(ms) => format!("{:.1}s", ms as f64 / 1000.0),
            None => "-".to_string(),
        }
    }

    /// Returns the status code, or "ERR" for transport failures.
    #[must_use]
    pub fn status_display(&self) -> String {
        self.status_code
            .map_or_else(|| "ERR".to_string(), |code| code.to_string())
    }
}

/// Request history with a maximum size limit.
#[derive(Debug, Clone, Default)]
pub struct RequestHistory {
    /// History entries (newest first).
    entries: VecDeque<HistoryEntry>,
    /// Maximum number of entries to keep.
    max_entries: usize,
}

impl RequestHistory {
    /// Creates a history from stored entries (newest first), trimmed to `max_entries`.
    #[must_use]
    pub fn from_entries(entries: Vec<HistoryEntry>, max_entries: usize) -> Self {
        let mut history = Self {
            entries: entries.into(),
            max_entries,
        };
        history.trim();
        history
    }

    /// Adds an entry to the history (at the front).
    pub fn add(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.trim();
    }

    fn trim(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_back();
        }
    }

    /// Returns all entries (newest first).
    #[must_use]
    pub const fn entries(&self) -> &VecDeque<HistoryEntry> {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the history, returning entries newest first.
    #[must_use]
    pub fn into_entries(self) -> Vec<HistoryEntry> {
        self.entries.into()
    }
}
