//! One open request tab: its inputs, editors, tab groups and response pane.

use std::fmt;

use antiposta_application::{SendRequestError, SendResult, SendResultExt, prepare};
use antiposta_domain::{
    RequestState,
    request::{BodyType, HttpMethod, RequestDraft, RequestSpec, SavedRequest},
};

use super::key_value_editor::KeyValueEditor;
use super::response_pane::ResponsePane;
use super::tab_group::{TabGroup, TabSwitch};

/// Target of the request headers tab.
pub const HEADERS_TAB: &str = "headers";
/// Target of the request params tab.
pub const PARAMS_TAB: &str = "params";
/// Target of the request body tab.
pub const BODY_TAB: &str = "body";

/// Class of the body type selector.
pub const BODY_TYPE_CLASS: &str = "body-type";

/// Title of a panel that has not been named.
pub const DEFAULT_TITLE: &str = "New Request";

/// Identity of a panel within the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub(crate) u64);

impl PanelId {
    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ticket for one send; only the panel's latest ticket renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SendToken(u64);

/// The three key/value editors of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// Headers tab editor
    Headers,
    /// Params tab editor
    Params,
    /// Form body editor
    Form,
}

impl EditorKind {
    /// Returns the lowercase name used by the console.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Headers => "header",
            Self::Params => "param",
            Self::Form => "form",
        }
    }
}

/// A request tab.
///
/// Inputs are plain fields; editors initialise lazily when their pane is
/// shown.
#[derive(Debug, Clone)]
pub struct RequestPanel {
    id: PanelId,
    title: String,
    /// Method selector
    pub method: HttpMethod,
    /// URL input
    pub url: String,
    body_type: BodyType,
    /// JSON body editor
    pub json_text: String,
    /// Raw text body editor
    pub text: String,
    headers: KeyValueEditor,
    params: KeyValueEditor,
    form: KeyValueEditor,
    request_tabs: TabGroup,
    response: ResponsePane,
    sends: u64,
}

impl RequestPanel {
    /// Creates an empty panel with the headers tab shown.
    #[must_use]
    pub fn new(id: PanelId, title: impl Into<String>) -> Self {
        let mut panel = Self {
            id,
            title: title.into(),
            method: HttpMethod::default(),
            url: String::new(),
            body_type: BodyType::default(),
            json_text: String::new(),
            text: String::new(),
            headers: KeyValueEditor::new(),
            params: KeyValueEditor::new(),
            form: KeyValueEditor::new(),
            request_tabs: TabGroup::new(
                "request",
                &[
                    (HEADERS_TAB, "Headers"),
                    (PARAMS_TAB, "Params"),
                    (BODY_TAB, "Body"),
                ],
                Some(HEADERS_TAB),
            ),
            response: ResponsePane::new(),
            sends: 0,
        };
        panel.headers.ensure_initialized();
        panel
    }

    /// Creates a panel holding a saved request, titled with its name.
    #[must_use]
    pub fn from_saved(id: PanelId, saved: &SavedRequest) -> Self {
        let mut panel = Self::new(id, saved.name.clone());
        panel.load_saved(saved);
        panel
    }

    /// Returns the panel id.
    #[must_use]
    pub const fn id(&self) -> PanelId {
        self.id
    }

    /// Returns the tab title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the tab title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns the selected body type.
    #[must_use]
    pub const fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Selects a body type.
    ///
    /// Choosing a form type while the body tab is shown initialises the
    /// form editor.
    pub fn set_body_type(&mut self, body_type: BodyType) {
        self.body_type = body_type;
        if body_type.uses_form_editor() && self.request_tabs.active() == Some(BODY_TAB) {
            self.form.ensure_initialized();
        }
    }

    /// Returns one of the panel's editors.
    #[must_use]
    pub const fn editor(&self, kind: EditorKind) -> &KeyValueEditor {
        match kind {
            EditorKind::Headers => &self.headers,
            EditorKind::Params => &self.params,
            EditorKind::Form => &self.form,
        }
    }

    /// Returns one of the panel's editors for editing.
    pub const fn editor_mut(&mut self, kind: EditorKind) -> &mut KeyValueEditor {
        match kind {
            EditorKind::Headers => &mut self.headers,
            EditorKind::Params => &mut self.params,
            EditorKind::Form => &mut self.form,
        }
    }

    /// Returns the request tab group.
    #[must_use]
    pub const fn request_tabs(&self) -> &TabGroup {
        &self.request_tabs
    }

    /// Switches the request tab group and initialises the editor it reveals.
    pub fn switch_request_tab(&mut self, target: &str) -> Option<TabSwitch> {
        let switch = self.request_tabs.switch_to(target)?;
        match switch.target {
            HEADERS_TAB => self.headers.ensure_initialized(),
            PARAMS_TAB => self.params.ensure_initialized(),
            BODY_TAB if self.body_type.uses_form_editor() => self.form.ensure_initialized(),
            _ => {}
        }
        Some(switch)
    }

    /// Switches the response tab group.
    pub fn switch_response_tab(&mut self, target: &str) -> Option<TabSwitch> {
        self.response.switch_tab(target)
    }

    /// Returns the response pane.
    #[must_use]
    pub const fn response(&self) -> &ResponsePane {
        &self.response
    }

    /// Returns the state of the latest send.
    #[must_use]
    pub const fn state(&self) -> &RequestState {
        self.response.state()
    }

    /// Collects the current inputs and editor data.
    #[must_use]
    pub fn draft(&self) -> RequestDraft {
        RequestDraft {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.get_data(),
            query_params: self.params.get_data(),
            body_type: self.body_type,
            json_text: self.json_text.clone(),
            text: self.text.clone(),
            form: self.form.get_data(),
        }
    }

    /// Starts a send from the current inputs.
    ///
    /// On success the pane shows "Sending..." and the returned token must be
    /// handed back to [`RequestPanel::complete_send`]. A validation failure
    /// is shown immediately and nothing should be dispatched.
    ///
    /// # Errors
    ///
    /// Returns the validation error raised by [`prepare`].
    pub fn begin_send(&mut self) -> Result<(SendToken, RequestSpec), SendRequestError> {
        self.sends += 1;
        let token = SendToken(self.sends);

        match prepare(&self.draft()) {
            Ok(spec) => {
                self.response.show(RequestState::loading());
                Ok((token, spec))
            }
            Err(e) => {
                self.response.show(e.to_request_state());
                Err(e)
            }
        }
    }

    /// Shows the outcome of a send if it is still the latest one.
    ///
    /// Returns false when the result was dropped as stale.
    pub fn complete_send(&mut self, token: SendToken, result: SendResult) -> bool {
        if token.0 != self.sends {
            tracing::debug!(
                panel = self.id.get(),
                token = token.0,
                latest = self.sends,
                "Dropping stale response"
            );
            return false;
        }
        self.response.show(result.to_request_state());
        true
    }

    /// Replaces every input and editor with a saved request.
    pub fn load_saved(&mut self, saved: &SavedRequest) {
        self.method = saved.method;
        self.url.clone_from(&saved.url);
        self.json_text.clone_from(&saved.json_text);
        self.text.clone_from(&saved.text);
        self.headers.load(&saved.headers);
        self.params.load(&saved.params);
        self.form.load(&saved.form);
        self.set_body_type(saved.body_type);
    }

    /// Captures the current inputs under a name.
    #[must_use]
    pub fn snapshot(&self, name: impl Into<String>) -> SavedRequest {
        SavedRequest::from_draft(name, &self.draft())
    }
}
