//! UI Bridge Module
//!
//! Defines the messages exchanged between a front-end and the
//! [`Workbench`](crate::Workbench): commands carry user intent in, updates
//! describe what changed.

use antiposta_domain::{
    HistoryEntry, RequestState, Theme,
    request::{BodyType, HttpMethod},
};

use crate::shortcuts::{KeyChord, Shortcut};
use crate::state::{EditorKind, PanelId};

/// An edit applied to one of the active panel's key/value editors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    /// Append a blank row.
    AddRow,
    /// Delete the row at a position.
    DeleteRow {
        /// Display position
        index: usize,
    },
    /// Set both inputs of the row at a position.
    SetRow {
        /// Display position
        index: usize,
        /// Key input text
        key: String,
        /// Value input text
        value: String,
    },
    /// Replace every row with one blank row.
    Clear,
}

/// Commands sent from a front-end to the workbench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// User picked a method.
    SetMethod(HttpMethod),

    /// User edited the URL input.
    SetUrl(String),

    /// User edited a key/value editor of the active panel.
    Editor {
        /// Which editor
        kind: EditorKind,
        /// The edit
        command: EditorCommand,
    },

    /// User picked a body type.
    SetBodyType(BodyType),

    /// User edited the JSON body.
    SetJsonBody(String),

    /// User edited the raw text body.
    SetTextBody(String),

    /// User clicked a request tab button.
    SwitchRequestTab(String),

    /// User clicked a response tab button.
    SwitchResponseTab(String),

    /// User clicked Send.
    Send,

    /// User clicked the new tab button.
    NewTab,

    /// User closed the active tab.
    CloseTab,

    /// User clicked a tab.
    SwitchTab(PanelId),

    /// User renamed the active tab.
    RenameTab(String),

    /// User toggled the theme.
    ToggleTheme,

    /// User toggled the split layout.
    ToggleSplitView,

    /// Save the active panel into a collection.
    SaveRequest {
        /// Collection name, created if missing
        collection: String,
        /// Request name
        name: String,
    },

    /// Open a saved request in a new tab.
    OpenSaved {
        /// Collection name
        collection: String,
        /// Request name
        name: String,
    },

    /// A key press that may be a shortcut.
    Key(KeyChord),
}

impl From<Shortcut> for UiCommand {
    fn from(shortcut: Shortcut) -> Self {
        match shortcut {
            Shortcut::NewTab => Self::NewTab,
            Shortcut::CloseTab => Self::CloseTab,
            Shortcut::ToggleSplitView => Self::ToggleSplitView,
        }
    }
}

/// Updates sent from the workbench back to the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    /// The active panel's inputs changed.
    PanelEdited(PanelId),

    /// A panel's response pane changed.
    State {
        /// Panel whose pane changed
        panel: PanelId,
        /// New state
        state: RequestState,
    },

    /// The set of tabs or the active tab changed.
    Tabs {
        /// Active panel after the change
        active: Option<PanelId>,
    },

    /// The theme changed.
    ThemeMode(Theme),

    /// The layout changed (true = split).
    SplitView(bool),

    /// A request was saved.
    Saved {
        /// Collection name
        collection: String,
        /// Request name
        name: String,
    },

    /// Show an error message.
    Error {
        /// Short title
        title: String,
        /// Message body
        message: String,
    },

    /// The command had no effect.
    Ignored,
}

/// History item for UI display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItemData {
    /// Entry id
    pub id: String,
    /// Method name
    pub method: String,
    /// Request URL
    pub url: String,
    /// Status code, or "ERR"
    pub status: String,
    /// Relative time
    pub time_ago: String,
    /// Round-trip time
    pub duration: String,
}

impl From<&HistoryEntry> for HistoryItemData {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            method: entry.method.to_string(),
            url: entry.url.clone(),
            status: entry.status_display(),
            time_ago: entry.time_ago(),
            duration: entry.duration_display(),
        }
    }
}
