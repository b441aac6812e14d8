//! The set of open request tabs plus window-wide toggles.

use antiposta_domain::{Theme, request::SavedRequest};

use super::request_panel::{DEFAULT_TITLE, PanelId, RequestPanel};

/// Open panels, the active panel, theme and layout.
#[derive(Debug, Clone)]
pub struct Shell {
    panels: Vec<RequestPanel>,
    active: Option<PanelId>,
    next_id: u64,
    theme: Theme,
    split_view: bool,
}

impl Shell {
    /// Creates a shell with one empty "New Request" panel, active.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        let mut shell = Self {
            panels: Vec::new(),
            active: None,
            next_id: 1,
            theme,
            split_view: false,
        };
        shell.new_tab();
        shell
    }

    fn next_panel_id(&mut self) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push(&mut self, panel: RequestPanel) -> PanelId {
        let id = panel.id();
        tracing::debug!(panel = id.get(), title = panel.title(), "Opened tab");
        self.panels.push(panel);
        self.active = Some(id);
        id
    }

    /// Opens an empty panel and makes it active.
    pub fn new_tab(&mut self) -> PanelId {
        let id = self.next_panel_id();
        self.push(RequestPanel::new(id, DEFAULT_TITLE))
    }

    /// Opens a panel holding `saved` and makes it active.
    pub fn open_saved(&mut self, saved: &SavedRequest) -> PanelId {
        let id = self.next_panel_id();
        self.push(RequestPanel::from_saved(id, saved))
    }

    /// Closes a panel.
    ///
    /// If it was active, the first remaining panel becomes active. Returns
    /// false for unknown ids.
    pub fn close_tab(&mut self, id: PanelId) -> bool {
        let Some(index) = self.position(id) else {
            tracing::warn!(panel = id.get(), "Close requested for unknown tab");
            return false;
        };

        self.panels.remove(index);
        if self.active == Some(id) {
            self.active = self.panels.first().map(RequestPanel::id);
        }
        tracing::debug!(panel = id.get(), remaining = self.panels.len(), "Closed tab");
        true
    }

    /// Closes the active panel, if any.
    pub fn close_active_tab(&mut self) -> Option<PanelId> {
        let id = self.active?;
        self.close_tab(id).then_some(id)
    }

    /// Makes a panel active. Returns false for unknown ids.
    pub fn switch_tab(&mut self, id: PanelId) -> bool {
        if self.position(id).is_none() {
            tracing::warn!(panel = id.get(), "Switch to unknown tab ignored");
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Renames a panel. Returns false for unknown ids.
    pub fn rename_panel(&mut self, id: PanelId, title: impl Into<String>) -> bool {
        let Some(panel) = self.panel_mut(id) else {
            return false;
        };
        panel.set_title(title);
        true
    }

    fn position(&self, id: PanelId) -> Option<usize> {
        self.panels.iter().position(|p| p.id() == id)
    }

    /// Returns the id of the active panel.
    #[must_use]
    pub const fn active_id(&self) -> Option<PanelId> {
        self.active
    }

    /// Returns the active panel.
    #[must_use]
    pub fn active_panel(&self) -> Option<&RequestPanel> {
        self.active.and_then(|id| self.panel(id))
    }

    /// Returns the active panel for editing.
    pub fn active_panel_mut(&mut self) -> Option<&mut RequestPanel> {
        let id = self.active?;
        self.panel_mut(id)
    }

    /// Returns a panel by id.
    #[must_use]
    pub fn panel(&self, id: PanelId) -> Option<&RequestPanel> {
        self.panels.iter().find(|p| p.id() == id)
    }

    /// Returns a panel by id for editing.
    pub fn panel_mut(&mut self, id: PanelId) -> Option<&mut RequestPanel> {
        self.panels.iter_mut().find(|p| p.id() == id)
    }

    /// Returns the open panels in tab order.
    #[must_use]
    pub fn panels(&self) -> &[RequestPanel] {
        &self.panels
    }

    /// Returns the panel id at a tab position.
    #[must_use]
    pub fn panel_at(&self, index: usize) -> Option<PanelId> {
        self.panels.get(index).map(RequestPanel::id)
    }

    /// Returns the current theme.
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Applies a theme.
    pub const fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Flips between light and dark, returning the new theme.
    pub const fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Returns true if request and response are shown side by side.
    #[must_use]
    pub const fn is_split_view(&self) -> bool {
        self.split_view
    }

    /// Flips the split layout, returning the new setting.
    pub const fn toggle_split_view(&mut self) -> bool {
        self.split_view = !self.split_view;
        self.split_view
    }
}
