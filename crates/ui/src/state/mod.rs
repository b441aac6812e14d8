//! View-model state: editors, tab groups, panels and the shell.

pub mod key_value_editor;
pub mod request_panel;
pub mod response_pane;
pub mod shell;
pub mod tab_group;

pub use key_value_editor::{Field, Focus, KeyValueEditor, KeyValueRow, RowId};
pub use request_panel::{EditorKind, PanelId, RequestPanel, SendToken};
pub use response_pane::ResponsePane;
pub use shell::Shell;
pub use tab_group::{TabEntry, TabGroup, TabSwitch, Visibility};
