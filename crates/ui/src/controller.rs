//! The workbench: shell state wired to the send use case and storage.
//!
//! A front-end owns one [`Workbench`] and mutates it from a single task.
//! Sending is split in three steps so several sends may be in flight:
//! [`Workbench::start_send`] validates and marks the panel loading,
//! [`PendingSend::run`] performs the network call without borrowing the
//! workbench, and [`Workbench::finish_send`] renders and records the result.

use std::sync::Arc;

use antiposta_application::{
    ApplicationError, ApplicationResult, HttpClient, KeyValueStore, SendRequest, SendResult,
    StorageAdapter,
};
use antiposta_domain::{
    Collection, HistoryEntry, Theme,
    collection::collection_mut,
    request::{HttpMethod, RequestSpec},
};

use crate::bridge::{EditorCommand, HistoryItemData, UiCommand, UiUpdate};
use crate::shortcuts::{Shortcut, ShortcutMatch};
use crate::state::{EditorKind, PanelId, SendToken, Shell};
use crate::state::request_panel::DEFAULT_TITLE;

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// A validated send waiting to be dispatched.
pub struct PendingSend<C: HttpClient> {
    panel: PanelId,
    token: SendToken,
    name: Option<String>,
    spec: RequestSpec,
    sender: Arc<SendRequest<C>>,
}

/// The outcome of a dispatched send.
pub struct CompletedSend {
    panel: PanelId,
    token: SendToken,
    name: Option<String>,
    method: HttpMethod,
    url: String,
    result: SendResult,
}

impl<C: HttpClient> PendingSend<C> {
    /// Returns the panel the send belongs to.
    #[must_use]
    pub const fn panel(&self) -> PanelId {
        self.panel
    }

    /// Returns the request being sent.
    #[must_use]
    pub const fn spec(&self) -> &RequestSpec {
        &self.spec
    }

    /// Performs the network call.
    pub async fn run(self) -> CompletedSend {
        let result = self.sender.dispatch(&self.spec).await;
        let url = self
            .spec
            .build_url()
            .map_or_else(|_| self.spec.url.clone(), String::from);
        CompletedSend {
            panel: self.panel,
            token: self.token,
            name: self.name,
            method: self.spec.method,
            url,
            result,
        }
    }
}

impl CompletedSend {
    /// Returns the panel the send belongs to.
    #[must_use]
    pub const fn panel(&self) -> PanelId {
        self.panel
    }

    fn history_entry(&self) -> HistoryEntry {
        let entry = match &self.result {
            Ok(view) => HistoryEntry::completed(
                self.method,
                self.url.clone(),
                view.status.code,
                u64::try_from(view.duration.as_millis()).unwrap_or(u64::MAX),
            ),
            Err(e) => HistoryEntry::failed(self.method, self.url.clone(), e.to_string()),
        };
        match &self.name {
            Some(name) => entry.with_name(name.clone()),
            None => entry,
        }
    }
}

/// Shell state plus the services it drives.
pub struct Workbench<C: HttpClient, S: KeyValueStore> {
    shell: Shell,
    sender: Arc<SendRequest<C>>,
    storage: StorageAdapter<S>,
    history_limit: usize,
}

impl<C: HttpClient, S: KeyValueStore> Workbench<C, S> {
    /// Creates a workbench with one empty panel and the light theme.
    ///
    /// Call [`Workbench::bootstrap`] to apply persisted settings.
    #[must_use]
    pub fn new(client: Arc<C>, storage: StorageAdapter<S>) -> Self {
        Self {
            shell: Shell::new(Theme::default()),
            sender: Arc::new(SendRequest::new(client)),
            storage,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Sets how many history entries are kept.
    #[must_use]
    pub const fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Applies the persisted theme.
    pub async fn bootstrap(&mut self) -> Theme {
        let theme = self.storage.get_theme().await;
        self.shell.set_theme(theme);
        tracing::info!(%theme, "Workbench ready");
        theme
    }

    /// Returns the shell.
    #[must_use]
    pub const fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Returns the shell for editing.
    pub const fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    /// Returns the storage adapter.
    #[must_use]
    pub const fn storage(&self) -> &StorageAdapter<S> {
        &self.storage
    }

    /// Flips the theme and persists it.
    pub async fn toggle_theme(&mut self) -> Theme {
        let theme = self.shell.toggle_theme();
        self.storage.save_theme(theme).await;
        theme
    }

    /// Validates a panel's inputs and marks it loading.
    ///
    /// Returns `None` if the panel does not exist or validation failed; in
    /// the latter case the panel already shows the error.
    pub fn start_send(&mut self, id: PanelId) -> Option<PendingSend<C>> {
        let Some(panel) = self.shell.panel_mut(id) else {
            tracing::warn!(panel = id.get(), "Send requested for unknown tab");
            return None;
        };

        let (token, spec) = panel.begin_send().ok()?;
        let name = (panel.title() != DEFAULT_TITLE).then(|| panel.title().to_string());

        Some(PendingSend {
            panel: id,
            token,
            name,
            spec,
            sender: Arc::clone(&self.sender),
        })
    }

    /// Renders a completed send and records it in the history.
    ///
    /// Returns true if the result was rendered; results for closed panels
    /// and superseded sends are dropped.
    pub async fn finish_send(&mut self, completed: CompletedSend) -> bool {
        self.storage
            .append_history(completed.history_entry(), self.history_limit)
            .await;

        let Some(panel) = self.shell.panel_mut(completed.panel) else {
            tracing::debug!(panel = completed.panel.get(), "Dropping response for closed tab");
            return false;
        };
        panel.complete_send(completed.token, completed.result)
    }

    /// Sends a panel's request and waits for the result.
    ///
    /// Returns true if a response or transport error was rendered.
    pub async fn send(&mut self, id: PanelId) -> bool {
        let Some(pending) = self.start_send(id) else {
            return false;
        };
        let completed = pending.run().await;
        self.finish_send(completed).await
    }

    /// Saves a panel into a collection, creating the collection if needed.
    ///
    /// A request with the same name in that collection is replaced. The panel
    /// is renamed to `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the panel does not exist or the store rejects the
    /// write.
    pub async fn save_to_collection(
        &mut self,
        id: PanelId,
        collection: &str,
        name: &str,
    ) -> ApplicationResult<()> {
        let Some(panel) = self.shell.panel_mut(id) else {
            tracing::warn!(panel = id.get(), "Save requested for unknown tab");
            return Err(ApplicationError::NotFound(format!("tab {id}")));
        };

        let saved = panel.snapshot(name);
        let mut collections = self.storage.get_collections().await;
        collection_mut(&mut collections, collection).upsert(saved);

        if !self.storage.save_collections(&collections).await {
            return Err(ApplicationError::Storage(format!(
                "could not save '{name}' to '{collection}'"
            )));
        }
        panel.set_title(name);
        tracing::debug!(collection, name, "Saved request");
        Ok(())
    }

    /// Returns the saved collections.
    pub async fn collections(&self) -> Vec<Collection> {
        self.storage.get_collections().await
    }

    /// Opens a saved request in a new tab.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] if no such request is saved.
    pub async fn open_saved(&mut self, collection: &str, name: &str) -> ApplicationResult<PanelId> {
        let collections = self.storage.get_collections().await;
        let Some(saved) = collections
            .iter()
            .find(|c| c.name == collection)
            .and_then(|c| c.request(name))
        else {
            tracing::warn!(collection, name, "Saved request not found");
            return Err(ApplicationError::NotFound(format!(
                "no request '{name}' in '{collection}'"
            )));
        };
        Ok(self.shell.open_saved(saved))
    }

    /// Returns the request history for display, newest first.
    pub async fn history(&self) -> Vec<HistoryItemData> {
        self.storage
            .get_history()
            .await
            .iter()
            .map(HistoryItemData::from)
            .collect()
    }

    /// Applies a front-end command.
    pub async fn handle(&mut self, command: UiCommand) -> UiUpdate {
        let command = match command {
            UiCommand::Key(chord) => match Shortcut::match_chord(chord) {
                Some(ShortcutMatch { shortcut, .. }) => UiCommand::from(shortcut),
                None => return UiUpdate::Ignored,
            },
            other => other,
        };

        match command {
            UiCommand::Send => {
                let Some(id) = self.shell.active_id() else {
                    return UiUpdate::Ignored;
                };
                self.send(id).await;
                self.state_update(id)
            }
            UiCommand::NewTab => {
                self.shell.new_tab();
                self.tabs_update()
            }
            UiCommand::CloseTab => {
                self.shell.close_active_tab();
                self.tabs_update()
            }
            UiCommand::SwitchTab(id) => {
                if self.shell.switch_tab(id) {
                    self.tabs_update()
                } else {
                    UiUpdate::Ignored
                }
            }
            UiCommand::ToggleTheme => UiUpdate::ThemeMode(self.toggle_theme().await),
            UiCommand::ToggleSplitView => UiUpdate::SplitView(self.shell.toggle_split_view()),
            UiCommand::SaveRequest { collection, name } => {
                let Some(id) = self.shell.active_id() else {
                    return UiUpdate::Ignored;
                };
                match self.save_to_collection(id, &collection, &name).await {
                    Ok(()) => UiUpdate::Saved { collection, name },
                    Err(e) => UiUpdate::Error {
                        title: "Save failed".to_string(),
                        message: e.to_string(),
                    },
                }
            }
            UiCommand::OpenSaved { collection, name } => {
                match self.open_saved(&collection, &name).await {
                    Ok(_) => self.tabs_update(),
                    Err(e) => UiUpdate::Error {
                        title: "Open failed".to_string(),
                        message: e.to_string(),
                    },
                }
            }
            edit => self.edit_active(edit),
        }
    }

    /// Applies a command that only touches the active panel's inputs.
    fn edit_active(&mut self, command: UiCommand) -> UiUpdate {
        let Some(panel) = self.shell.active_panel_mut() else {
            return UiUpdate::Ignored;
        };
        let id = panel.id();

        let applied = match command {
            UiCommand::SetMethod(method) => {
                panel.method = method;
                true
            }
            UiCommand::SetUrl(url) => {
                panel.url = url;
                true
            }
            UiCommand::SetBodyType(body_type) => {
                panel.set_body_type(body_type);
                true
            }
            UiCommand::SetJsonBody(text) => {
                panel.json_text = text;
                true
            }
            UiCommand::SetTextBody(text) => {
                panel.text = text;
                true
            }
            UiCommand::SwitchRequestTab(target) => panel.switch_request_tab(&target).is_some(),
            UiCommand::SwitchResponseTab(target) => panel.switch_response_tab(&target).is_some(),
            UiCommand::RenameTab(title) => {
                panel.set_title(title);
                true
            }
            UiCommand::Editor { kind, command } => {
                apply_editor(panel.editor_mut(kind), kind, command)
            }
            _ => false,
        };

        if applied {
            UiUpdate::PanelEdited(id)
        } else {
            UiUpdate::Ignored
        }
    }

    fn state_update(&self, id: PanelId) -> UiUpdate {
        self.shell
            .panel(id)
            .map_or(UiUpdate::Ignored, |panel| UiUpdate::State {
                panel: id,
                state: panel.state().clone(),
            })
    }

    const fn tabs_update(&self) -> UiUpdate {
        UiUpdate::Tabs {
            active: self.shell.active_id(),
        }
    }
}

fn apply_editor(
    editor: &mut crate::state::KeyValueEditor,
    kind: EditorKind,
    command: EditorCommand,
) -> bool {
    editor.ensure_initialized();
    match command {
        EditorCommand::AddRow => {
            editor.add_row();
            true
        }
        EditorCommand::DeleteRow { index } => editor
            .row_at(index)
            .is_some_and(|row| editor.delete_row(row)),
        EditorCommand::SetRow { index, key, value } => {
            let row = match editor.row_at(index) {
                Some(row) => row,
                None if index == editor.rows().len() => editor.add_row(),
                None => {
                    tracing::warn!(editor = kind.as_str(), index, "Edit of unknown row ignored");
                    return false;
                }
            };
            editor.set_key(row, key) && editor.set_value(row, value)
        }
        EditorCommand::Clear => {
            editor.clear();
            true
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use antiposta_application::{HttpClientError, StorageKeys};
    use antiposta_domain::request::{BodyType, KeyValueMap};
    use antiposta_domain::response::HttpResponse;
    use antiposta_infrastructure::MemoryStore;
    use pretty_assertions::assert_eq;
    use std::future::Future;
    use std::sync::Mutex;

    use crate::shortcuts::KeyChord;

    struct MockHttpClient {
        response: Result<HttpResponse, HttpClientError>,
        sent: Mutex<Vec<RequestSpec>>,
    }

    impl MockHttpClient {
        fn ok(status: u16) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(HttpResponse::new(
                    status,
                    vec![("content-type".to_string(), "text/plain".to_string())],
                    b"pong".to_vec(),
                )),
                sent: Mutex::new(Vec::new()),
            })
        }

        fn sent(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    impl HttpClient for MockHttpClient {
        fn send(
            &self,
            request: &RequestSpec,
        ) -> impl Future<Output = Result<HttpResponse, HttpClientError>> + Send {
            self.sent.lock().unwrap().push(request.clone());
            let result = self.response.clone();
            async move { result }
        }
    }

    fn workbench(client: &Arc<MockHttpClient>) -> Workbench<MockHttpClient, MemoryStore> {
        let storage = StorageAdapter::new(Arc::new(MemoryStore::new()), StorageKeys::default());
        Workbench::new(Arc::clone(client), storage)
    }

    async fn set_url(bench: &mut Workbench<MockHttpClient, MemoryStore>, url: &str) {
        bench.handle(UiCommand::SetUrl(url.to_string())).await;
    }

    #[tokio::test]
    async fn test_bootstrap_applies_saved_theme() {
        let client = MockHttpClient::ok(200);
        let mut bench = workbench(&client);
        bench.storage().save_theme(Theme::Dark).await;

        assert_eq!(bench.bootstrap().await, Theme::Dark);
        assert_eq!(bench.shell().theme(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_toggle_theme_persists() {
        let client = MockHttpClient::ok(200);
        let mut bench = workbench(&client);

        assert_eq!(
            bench.handle(UiCommand::ToggleTheme).await,
            UiUpdate::ThemeMode(Theme::Dark)
        );
        assert_eq!(bench.storage().get_theme().await, Theme::Dark);
    }

    #[tokio::test]
    async fn test_send_renders_and_records_history() {
        let client = MockHttpClient::ok(200);
        let mut bench = workbench(&client);
        set_url(&mut bench, "https://example.com/ping").await;

        let update = bench.handle(UiCommand::Send).await;

        assert!(matches!(update, UiUpdate::State { .. }));
        if let UiUpdate::State { state, .. } = update {
            assert_eq!(state.status_text(), "200 OK");
            assert_eq!(state.body_text(), "pong");
        }

        let history = bench.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].url, "https://example.com/ping");
        assert_eq!(history[0].status, "200");
    }

    #[tokio::test]
    async fn test_history_records_url_with_params() {
        let client = MockHttpClient::ok(200);
        let mut bench = workbench(&client);
        set_url(&mut bench, "https://example.com/items").await;
        bench
            .handle(UiCommand::Editor {
                kind: EditorKind::Params,
                command: EditorCommand::SetRow {
                    index: 0,
                    key: "page".to_string(),
                    value: "2".to_string(),
                },
            })
            .await;

        bench.handle(UiCommand::Send).await;

        let history = bench.storage().get_history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].url, "https://example.com/items?page=2");
    }

    #[tokio::test]
    async fn test_invalid_send_never_dispatches() {
        let client = MockHttpClient::ok(200);
        let mut bench = workbench(&client);
        set_url(&mut bench, "https://example.com").await;
        bench.handle(UiCommand::SetMethod(HttpMethod::Post)).await;
        bench.handle(UiCommand::SetBodyType(BodyType::Json)).await;
        bench.handle(UiCommand::SetJsonBody("{bad json".to_string())).await;

        bench.handle(UiCommand::Send).await;

        let panel = bench.shell().active_panel().unwrap();
        assert_eq!(
            panel.response().body_text().lines().next(),
            Some("Invalid JSON in request body")
        );
        assert_eq!(client.sent(), 0);
        assert!(bench.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_response_for_closed_tab_is_dropped() {
        let client = MockHttpClient::ok(200);
        let mut bench = workbench(&client);
        set_url(&mut bench, "https://example.com").await;
        let id = bench.shell().active_id().unwrap();

        let pending = bench.start_send(id).unwrap();
        bench.handle(UiCommand::CloseTab).await;
        let completed = pending.run().await;

        assert!(!bench.finish_send(completed).await);
        assert_eq!(bench.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_superseded_send_is_not_rendered() {
        let client = MockHttpClient::ok(204);
        let mut bench = workbench(&client);
        set_url(&mut bench, "https://example.com").await;
        let id = bench.shell().active_id().unwrap();

        let first = bench.start_send(id).unwrap();
        let second = bench.start_send(id).unwrap();

        let second = second.run().await;
        let first = first.run().await;

        assert!(bench.finish_send(second).await);
        assert!(!bench.finish_send(first).await);
    }

    #[tokio::test]
    async fn test_save_and_reopen_request() {
        let client = MockHttpClient::ok(200);
        let mut bench = workbench(&client);
        set_url(&mut bench, "https://example.com/users").await;
        bench
            .handle(UiCommand::Editor {
                kind: EditorKind::Headers,
                command: EditorCommand::SetRow {
                    index: 0,
                    key: "Accept".to_string(),
                    value: "application/json".to_string(),
                },
            })
            .await;

        let saved = bench
            .handle(UiCommand::SaveRequest {
                collection: "users".to_string(),
                name: "list".to_string(),
            })
            .await;
        assert!(matches!(saved, UiUpdate::Saved { .. }));
        assert_eq!(bench.shell().active_panel().unwrap().title(), "list");

        let collections = bench.collections().await;
        assert_eq!(collections.len(), 1);
        assert_eq!(collections[0].requests[0].url, "https://example.com/users");

        let id = bench.open_saved("users", "list").await.unwrap();
        let panel = bench.shell().panel(id).unwrap();
        assert_eq!(panel.draft().headers.get("Accept"), Some("application/json"));
        assert_eq!(bench.shell().panels().len(), 2);

        assert_eq!(
            bench.open_saved("users", "missing").await,
            Err(ApplicationError::NotFound(
                "no request 'missing' in 'users'".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_shortcuts_drive_shell() {
        let client = MockHttpClient::ok(200);
        let mut bench = workbench(&client);

        bench.handle(UiCommand::Key(KeyChord::ctrl('t'))).await;
        assert_eq!(bench.shell().panels().len(), 2);

        bench.handle(UiCommand::Key(KeyChord::meta('w'))).await;
        assert_eq!(bench.shell().panels().len(), 1);

        assert_eq!(
            bench.handle(UiCommand::Key(KeyChord::ctrl('b'))).await,
            UiUpdate::SplitView(true)
        );
        assert_eq!(
            bench.handle(UiCommand::Key(KeyChord::plain('t'))).await,
            UiUpdate::Ignored
        );
    }

    #[tokio::test]
    async fn test_editor_commands() {
        let client = MockHttpClient::ok(200);
        let mut bench = workbench(&client);
        let edit = |command| UiCommand::Editor {
            kind: EditorKind::Params,
            command,
        };

        bench
            .handle(edit(EditorCommand::SetRow {
                index: 0,
                key: "a".to_string(),
                value: "1".to_string(),
            }))
            .await;
        bench
            .handle(edit(EditorCommand::SetRow {
                index: 1,
                key: "b".to_string(),
                value: "2".to_string(),
            }))
            .await;
        assert_eq!(
            bench.handle(edit(EditorCommand::DeleteRow { index: 5 })).await,
            UiUpdate::Ignored
        );
        bench.handle(edit(EditorCommand::DeleteRow { index: 0 })).await;

        let draft = bench.shell().active_panel().unwrap().draft();
        let expected: KeyValueMap = [("b", "2")].into_iter().collect();
        assert_eq!(draft.query_params, expected);
    }
}
