//! Line-oriented front-end over the workbench.
//!
//! Each input line is one command; the console prints the part of the view
//! the command changed. A terminal gets line editing and history through
//! `rustyline`; piped input is read line by line.

use std::fmt::Write as _;
use std::io;

use antiposta_application::{HttpClient, KeyValueStore};
use antiposta_domain::request::{BodyType, HttpMethod};
use antiposta_ui::render::{render_request, render_response, render_tabs};
use antiposta_ui::{EditorCommand, EditorKind, KeyChord, UiCommand, UiUpdate, Workbench};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "antiposta> ";

/// Errors that stop the console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Reading input or writing output failed.
    #[error("console I/O error: {0}")]
    Io(#[from] io::Error),

    /// The line editor failed.
    #[error("line editor error: {0}")]
    Readline(#[from] ReadlineError),
}

/// A line that could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ParseError(String);

fn usage(text: &str) -> ParseError {
    ParseError(format!("Usage: {text}"))
}

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Forwarded to the workbench
    Ui(UiCommand),
    /// Switch to the tab at a position
    SwitchIndex(usize),
    /// Print the active panel
    Show,
    /// Print the open tabs
    Tabs,
    /// Print saved collections
    Collections,
    /// Print request history
    History,
    /// Print command help
    Help,
    /// Leave the console
    Quit,
}

/// Splits off the first word, returning it and the trimmed remainder.
fn split_word(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.find(char::is_whitespace) {
        Some(end) => (&line[..end], line[end..].trim_start()),
        None => (line, ""),
    }
}

fn parse_index(word: &str, text: &str) -> Result<usize, ParseError> {
    word.parse().map_err(|_| usage(text))
}

fn parse_editor(kind: EditorKind, rest: &str) -> Result<ConsoleCommand, ParseError> {
    let help = format!("{} add | rm <n> | set <n> <key> [value] | clear", kind.as_str());
    let (action, rest) = split_word(rest);
    let command = match action {
        "add" => EditorCommand::AddRow,
        "clear" => EditorCommand::Clear,
        "rm" => EditorCommand::DeleteRow {
            index: parse_index(split_word(rest).0, &help)?,
        },
        "set" => {
            let (index, rest) = split_word(rest);
            let (key, value) = split_word(rest);
            if key.is_empty() {
                return Err(usage(&help));
            }
            EditorCommand::SetRow {
                index: parse_index(index, &help)?,
                key: key.to_string(),
                value: value.to_string(),
            }
        }
        _ => return Err(usage(&help)),
    };
    Ok(ConsoleCommand::Ui(UiCommand::Editor { kind, command }))
}

fn parse_chord(word: &str) -> Option<KeyChord> {
    let mut chars = word.strip_prefix('^')?.chars();
    let key = chars.next()?;
    chars.next().is_none().then(|| KeyChord::ctrl(key))
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns a usage message for unknown or malformed commands.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = split_word(line);
    let ui = |command: UiCommand| -> Result<Option<ConsoleCommand>, ParseError> {
        Ok(Some(ConsoleCommand::Ui(command)))
    };

    match word {
        "method" => {
            let method: HttpMethod = rest
                .parse()
                .map_err(|_| usage("method GET|POST|PUT|PATCH|DELETE|HEAD|OPTIONS"))?;
            ui(UiCommand::SetMethod(method))
        }
        "url" => ui(UiCommand::SetUrl(rest.to_string())),
        "header" => parse_editor(EditorKind::Headers, rest).map(Some),
        "param" => parse_editor(EditorKind::Params, rest).map(Some),
        "form" => parse_editor(EditorKind::Form, rest).map(Some),
        "body" => {
            let (kind, content) = split_word(rest);
            match kind {
                "type" => {
                    let body_type: BodyType = content
                        .parse()
                        .map_err(|_| usage("body type none|json|form|urlencoded|text"))?;
                    ui(UiCommand::SetBodyType(body_type))
                }
                "json" => ui(UiCommand::SetJsonBody(content.to_string())),
                "text" => ui(UiCommand::SetTextBody(content.to_string())),
                _ => Err(usage("body type <t> | body json <text> | body text <text>")),
            }
        }
        "tab" => {
            let (group, target) = split_word(rest);
            let target = target.to_string();
            match group {
                "request" => ui(UiCommand::SwitchRequestTab(target)),
                "response" => ui(UiCommand::SwitchResponseTab(target)),
                _ => Err(usage("tab request|response <target>")),
            }
        }
        "send" => ui(UiCommand::Send),
        "new" => ui(UiCommand::NewTab),
        "close" => ui(UiCommand::CloseTab),
        "rename" if rest.is_empty() => Err(usage("rename <title>")),
        "rename" => ui(UiCommand::RenameTab(rest.to_string())),
        "theme" => ui(UiCommand::ToggleTheme),
        "split" => ui(UiCommand::ToggleSplitView),
        "switch" => Ok(Some(ConsoleCommand::SwitchIndex(parse_index(
            rest,
            "switch <n>",
        )?))),
        "save" | "open" => {
            let (collection, name) = split_word(rest);
            if collection.is_empty() || name.is_empty() {
                return Err(usage(&format!("{word} <collection> <name>")));
            }
            let (collection, name) = (collection.to_string(), name.to_string());
            if word == "save" {
                ui(UiCommand::SaveRequest { collection, name })
            } else {
                ui(UiCommand::OpenSaved { collection, name })
            }
        }
        "show" => Ok(Some(ConsoleCommand::Show)),
        "tabs" => Ok(Some(ConsoleCommand::Tabs)),
        "collections" => Ok(Some(ConsoleCommand::Collections)),
        "history" => Ok(Some(ConsoleCommand::History)),
        "help" => Ok(Some(ConsoleCommand::Help)),
        "quit" | "exit" => Ok(Some(ConsoleCommand::Quit)),
        chord => match parse_chord(chord) {
            Some(chord) => ui(UiCommand::Key(chord)),
            None => Err(ParseError(format!("Unknown command: {chord} (try 'help')"))),
        },
    }
}

const HELP: &str = "\
method <M>                      set the method
url <text>                      set the URL
header|param|form add           append a row
header|param|form rm <n>        delete row n
header|param|form set <n> <k> [v]  set row n
header|param|form clear         reset the editor
body type none|json|form|urlencoded|text
body json <text> | body text <text>
tab request headers|params|body
tab response body|headers
send                            send the active request
show                            print the active request and response
new | close | switch <n> | tabs | rename <title>
theme | split                   toggle theme / layout
save <collection> <name>        save the active request
open <collection> <name>        open a saved request in a new tab
collections | history
^t ^w ^b                        new tab, close tab, toggle split
quit";

/// Drives a [`Workbench`] from text commands.
pub struct Console<C: HttpClient, S: KeyValueStore> {
    workbench: Workbench<C, S>,
}

impl<C: HttpClient, S: KeyValueStore> Console<C, S> {
    /// Wraps a bootstrapped workbench.
    #[must_use]
    pub const fn new(workbench: Workbench<C, S>) -> Self {
        Self { workbench }
    }

    /// Returns the workbench.
    #[must_use]
    pub const fn workbench(&self) -> &Workbench<C, S> {
        &self.workbench
    }

    /// Reads commands from piped input until end of input or `quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<(), ConsoleError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let Some(text) = self.process_line(&line).await else {
                break;
            };
            write_text(output, &text).await?;
        }
        output.flush().await?;
        Ok(())
    }

    /// Reads commands from the terminal with line editing and history until
    /// end of input, Ctrl-C or `quit`.
    ///
    /// Needs a multi-threaded runtime: the blocking read runs in place on the
    /// current worker.
    ///
    /// # Errors
    ///
    /// Returns an error if the line editor or the output fails.
    pub async fn run_interactive<W>(&mut self, output: &mut W) -> Result<(), ConsoleError>
    where
        W: AsyncWrite + Unpin,
    {
        let mut editor = DefaultEditor::new()?;
        loop {
            let line = match tokio::task::block_in_place(|| editor.readline(PROMPT)) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };
            if !line.trim().is_empty() {
                let _ = editor.add_history_entry(line.as_str());
            }

            let Some(text) = self.process_line(&line).await else {
                break;
            };
            write_text(output, &text).await?;
            output.flush().await?;
        }
        Ok(())
    }

    /// Handles one input line and returns what to print, or `None` to stop.
    pub async fn process_line(&mut self, line: &str) -> Option<String> {
        match parse_line(line) {
            Ok(None) => Some(String::new()),
            Ok(Some(ConsoleCommand::Quit)) => None,
            Ok(Some(command)) => Some(self.execute(command).await),
            Err(e) => Some(format!("Error: {e}")),
        }
    }

    /// Runs one command and returns what to print.
    pub async fn execute(&mut self, command: ConsoleCommand) -> String {
        match command {
            ConsoleCommand::Ui(command) => {
                let update = self.workbench.handle(command).await;
                self.describe(&update)
            }
            ConsoleCommand::SwitchIndex(index) => {
                match self.workbench.shell().panel_at(index) {
                    Some(id) => {
                        let update = self.workbench.handle(UiCommand::SwitchTab(id)).await;
                        self.describe(&update)
                    }
                    None => format!("Error: no tab {index}"),
                }
            }
            ConsoleCommand::Show => self.show(),
            ConsoleCommand::Tabs => render_tabs(self.workbench.shell()),
            ConsoleCommand::Collections => {
                let mut out = String::new();
                for collection in self.workbench.collections().await {
                    let _ = writeln!(out, "{}", collection.name);
                    for request in &collection.requests {
                        let _ = writeln!(
                            out,
                            "  {} {} {}",
                            request.name, request.method, request.url
                        );
                    }
                }
                if out.is_empty() {
                    out.push_str("No collections");
                }
                out
            }
            ConsoleCommand::History => {
                let mut out = String::new();
                for item in self.workbench.history().await {
                    let _ = writeln!(
                        out,
                        "{:<4} {:<7} {} ({}, {})",
                        item.status, item.method, item.url, item.duration, item.time_ago
                    );
                }
                if out.is_empty() {
                    out.push_str("No history");
                }
                out
            }
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Quit => String::new(),
        }
    }

    fn show(&self) -> String {
        match self.workbench.shell().active_panel() {
            Some(panel) => {
                let mut out = render_request(panel);
                let response = render_response(panel);
                if !response.is_empty() {
                    out.push_str("--\n");
                    out.push_str(&response);
                }
                out
            }
            None => "No open tabs (use 'new')".to_string(),
        }
    }

    fn describe(&self, update: &UiUpdate) -> String {
        let shell = self.workbench.shell();
        match update {
            UiUpdate::PanelEdited(id) => shell.panel(*id).map(render_request).unwrap_or_default(),
            UiUpdate::State { panel, .. } => {
                shell.panel(*panel).map(render_response).unwrap_or_default()
            }
            UiUpdate::Tabs { .. } => render_tabs(shell),
            UiUpdate::ThemeMode(theme) => format!("theme: {theme}"),
            UiUpdate::SplitView(split) => {
                format!("layout: {}", if *split { "split" } else { "stacked" })
            }
            UiUpdate::Saved { collection, name } => format!("Saved '{name}' to '{collection}'"),
            UiUpdate::Error { title, message } => format!("{title}: {message}"),
            UiUpdate::Ignored => "Nothing to do".to_string(),
        }
    }
}

async fn write_text<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> io::Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    output.write_all(text.as_bytes()).await?;
    if !text.ends_with('\n') {
        output.write_all(b"\n").await?;
    }
    Ok(())
}
