//! Response side of a request panel.

use antiposta_domain::RequestState;

use super::tab_group::{TabGroup, TabSwitch};

/// Target of the response body tab.
pub const BODY_TAB: &str = "body";
/// Target of the response headers tab.
pub const HEADERS_TAB: &str = "headers";

/// The response tabs plus the state of the panel's latest send.
#[derive(Debug, Clone)]
pub struct ResponsePane {
    tabs: TabGroup,
    state: RequestState,
}

impl Default for ResponsePane {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponsePane {
    /// Creates an idle pane with the body tab active.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tabs: TabGroup::new(
                "response",
                &[(BODY_TAB, "Body"), (HEADERS_TAB, "Headers")],
                Some(BODY_TAB),
            ),
            state: RequestState::Idle,
        }
    }

    /// Returns the response tab group.
    #[must_use]
    pub const fn tabs(&self) -> &TabGroup {
        &self.tabs
    }

    /// Switches the response tab group.
    pub fn switch_tab(&mut self, target: &str) -> Option<TabSwitch> {
        self.tabs.switch_to(target)
    }

    /// Returns the state being displayed.
    #[must_use]
    pub const fn state(&self) -> &RequestState {
        &self.state
    }

    /// Replaces the displayed state.
    pub fn show(&mut self, state: RequestState) {
        self.state = state;
    }

    /// Text of the status element (`"200 OK"`, `"Sending..."`, `"Error"`).
    #[must_use]
    pub fn status_text(&self) -> String {
        self.state.status_text()
    }

    /// Class string of the status element.
    #[must_use]
    pub fn status_class(&self) -> &'static str {
        self.state.status_class()
    }

    /// Elapsed time and body size, shown next to the status.
    #[must_use]
    pub fn meta_text(&self) -> Option<String> {
        self.state
            .response()
            .map(|r| format!("{} | {}", r.duration_display(), r.size_display()))
    }

    /// Contents of the headers pane, one `name: value` line per header.
    #[must_use]
    pub fn headers_text(&self) -> String {
        self.state
            .response()
            .map(|r| r.header_lines().join("\n"))
            .unwrap_or_default()
    }

    /// Contents of the body pane.
    ///
    /// For an error state this is the error message, followed by its
    /// details when present.
    #[must_use]
    pub fn body_text(&self) -> String {
        match &self.state {
            RequestState::Error {
                message,
                details: Some(details),
                ..
            } if details != message => format!("{message}\n{details}"),
            state => state.body_text().to_string(),
        }
    }
}
