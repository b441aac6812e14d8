//! Antiposta UI - View-model layer
//!
//! This crate holds the state a front-end renders: request panels with their
//! key/value editors and tab groups, the shell of open tabs, keyboard
//! shortcuts, and the [`Workbench`] that wires them to sending and storage.
//! Rendering is derived from this state and never read back from it.

pub mod bridge;
pub mod controller;
pub mod render;
pub mod shortcuts;
pub mod state;

pub use bridge::{EditorCommand, HistoryItemData, UiCommand, UiUpdate};
pub use controller::{CompletedSend, DEFAULT_HISTORY_LIMIT, PendingSend, Workbench};
pub use shortcuts::{KeyChord, Shortcut, ShortcutMatch};
pub use state::{EditorKind, KeyValueEditor, PanelId, RequestPanel, ResponsePane, Shell, TabGroup};
