//! Plain-text rendering of the view-model for terminal front-ends.

use std::fmt::Write as _;

use antiposta_domain::request::BodyType;

use crate::state::{EditorKind, KeyValueEditor, RequestPanel, Shell, TabGroup};
use crate::state::request_panel::{BODY_TAB, BODY_TYPE_CLASS, HEADERS_TAB, PARAMS_TAB};
use crate::state::response_pane;

/// One line per open tab, the active one marked with `*`.
#[must_use]
pub fn render_tabs(shell: &Shell) -> String {
    let mut out = String::new();
    for (index, panel) in shell.panels().iter().enumerate() {
        let marker = if shell.active_id() == Some(panel.id()) {
            '*'
        } else {
            ' '
        };
        let _ = writeln!(out, "{marker} {index}: {}", panel.title());
    }
    let _ = write!(
        out,
        "theme: {} | layout: {}",
        shell.theme(),
        if shell.is_split_view() { "split" } else { "stacked" }
    );
    out
}

fn render_group(out: &mut String, group: &TabGroup) {
    let labels: Vec<String> = group
        .entries()
        .iter()
        .map(|e| {
            if e.visibility.is_active() {
                format!("[{}]", e.label)
            } else {
                e.label.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "{}", labels.join("  "));
}

fn render_editor(out: &mut String, kind: EditorKind, editor: &KeyValueEditor) {
    for (index, row) in editor.rows().iter().enumerate() {
        let _ = writeln!(out, "  {} {index}: {} = {}", kind.as_str(), row.key, row.value);
    }
}

/// The request side of a panel: inputs and the visible request tab.
#[must_use]
pub fn render_request(panel: &RequestPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", panel.title());
    let _ = writeln!(out, "{} {}", panel.method, panel.url);
    render_group(&mut out, panel.request_tabs());

    match panel.request_tabs().active() {
        Some(HEADERS_TAB) => {
            render_editor(&mut out, EditorKind::Headers, panel.editor(EditorKind::Headers));
        }
        Some(PARAMS_TAB) => {
            render_editor(&mut out, EditorKind::Params, panel.editor(EditorKind::Params));
        }
        Some(BODY_TAB) => {
            let body_type = panel.body_type();
            let _ = writeln!(out, "  {BODY_TYPE_CLASS}: {body_type}");
            if body_type.uses_form_editor() {
                render_editor(&mut out, EditorKind::Form, panel.editor(EditorKind::Form));
            } else if body_type == BodyType::Json {
                let _ = writeln!(out, "{}", panel.json_text);
            } else if body_type == BodyType::Text {
                let _ = writeln!(out, "{}", panel.text);
            }
        }
        _ => {}
    }
    out
}

/// The response side of a panel: status, metadata and the visible tab.
#[must_use]
pub fn render_response(panel: &RequestPanel) -> String {
    let pane = panel.response();
    let mut out = String::new();

    let status = pane.status_text();
    if status.is_empty() {
        return out;
    }
    match pane.meta_text() {
        Some(meta) => {
            let _ = writeln!(out, "{status}  ({meta})");
        }
        None => {
            let _ = writeln!(out, "{status}");
        }
    }
    render_group(&mut out, pane.tabs());

    match pane.tabs().active() {
        Some(response_pane::HEADERS_TAB) => out.push_str(&pane.headers_text()),
        Some(response_pane::BODY_TAB) => out.push_str(&pane.body_text()),
        _ => {}
    }
    out
}
