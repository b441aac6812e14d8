//! Editable list of key/value rows.
//!
//! Backs the headers, params and form editors of a request panel. The row
//! list is the source of truth; rendering is derived from it.

use antiposta_domain::request::{KeyValueMap, KeyValuePair};

/// Stable identity of a row within one editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Which input of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The key input
    Key,
    /// The value input
    Value,
}

/// Where input focus should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    /// Focused row
    pub row: RowId,
    /// Focused input
    pub field: Field,
}

/// One row of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueRow {
    /// Row identity
    pub id: RowId,
    /// Key input text, untrimmed
    pub key: String,
    /// Value input text, untrimmed
    pub value: String,
}

impl KeyValueRow {
    /// The blank row every new row is cloned from.
    #[must_use]
    pub const fn blank(id: RowId) -> Self {
        Self {
            id,
            key: String::new(),
            value: String::new(),
        }
    }

    /// Class string of the row element.
    #[must_use]
    pub const fn class(&self) -> &'static str {
        "key-value-row"
    }
}

/// An ordered, append/delete-capable list of key/value rows.
///
/// Once initialised the editor always holds at least one row.
#[derive(Debug, Clone, Default)]
pub struct KeyValueEditor {
    rows: Vec<KeyValueRow>,
    next_id: u64,
    focus: Option<Focus>,
    initialized: bool,
}

impl KeyValueEditor {
    /// Creates an editor that has not been shown yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_row(&mut self) -> KeyValueRow {
        let id = RowId(self.next_id);
        self.next_id += 1;
        KeyValueRow::blank(id)
    }

    /// Called when the editor's pane becomes visible.
    ///
    /// Marks the editor initialised and guarantees at least one row. Calling
    /// it again is harmless.
    pub fn ensure_initialized(&mut self) {
        if !self.initialized {
            tracing::debug!("Initializing key/value editor");
            self.initialized = true;
        }
        if self.rows.is_empty() {
            let row = self.next_row();
            self.rows.push(row);
        }
    }

    /// Returns true once the editor has been shown.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Appends a blank row and focuses its key input.
    pub fn add_row(&mut self) -> RowId {
        let row = self.next_row();
        let id = row.id;
        self.rows.push(row);
        self.focus = Some(Focus {
            row: id,
            field: Field::Key,
        });
        id
    }

    /// Removes a row, or clears it in place if it is the only row.
    ///
    /// Returns false if no row has that id.
    pub fn delete_row(&mut self, id: RowId) -> bool {
        let Some(index) = self.rows.iter().position(|r| r.id == id) else {
            tracing::warn!(row = id.get(), "Delete requested for unknown row");
            return false;
        };

        if self.rows.len() <= 1 {
            let row = &mut self.rows[index];
            row.key.clear();
            row.value.clear();
            return true;
        }

        self.rows.remove(index);
        if self.focus.is_some_and(|f| f.row == id) {
            self.focus = None;
        }
        true
    }

    /// Sets the key input text of a row. Returns false for unknown ids.
    pub fn set_key(&mut self, id: RowId, text: impl Into<String>) -> bool {
        let Some(row) = self.row_mut(id) else {
            return false;
        };
        row.key = text.into();
        true
    }

    /// Sets the value input text of a row. Returns false for unknown ids.
    pub fn set_value(&mut self, id: RowId, text: impl Into<String>) -> bool {
        let Some(row) = self.row_mut(id) else {
            return false;
        };
        row.value = text.into();
        true
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut KeyValueRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// Collapses the rows into a map.
    ///
    /// Keys and values are trimmed, rows with an empty key are skipped and a
    /// later row overwrites an earlier row with the same key.
    #[must_use]
    pub fn get_data(&self) -> KeyValueMap {
        self.rows
            .iter()
            .map(|row| (row.key.trim(), row.value.trim()))
            .filter(|(key, _)| !key.is_empty())
            .collect()
    }

    /// Removes every row and adds one fresh blank row.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.add_row();
    }

    /// Replaces the rows with `pairs`.
    ///
    /// Does not initialise a hidden editor; an editor already shown keeps at
    /// least one row.
    pub fn load(&mut self, pairs: &[KeyValuePair]) {
        self.rows.clear();
        self.focus = None;
        for pair in pairs {
            let mut row = self.next_row();
            row.key.clone_from(&pair.key);
            row.value.clone_from(&pair.value);
            self.rows.push(row);
        }
        if self.initialized && self.rows.is_empty() {
            let row = self.next_row();
            self.rows.push(row);
        }
    }

    /// Returns the rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[KeyValueRow] {
        &self.rows
    }

    /// Returns the id of the row at a display position.
    #[must_use]
    pub fn row_at(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).map(|r| r.id)
    }

    /// Returns the last row, initialising the editor if needed.
    pub fn last_row(&mut self) -> RowId {
        self.ensure_initialized();
        if let Some(id) = self.rows.last().map(|r| r.id) {
            return id;
        }
        self.add_row()
    }

    /// Returns where input focus should be.
    #[must_use]
    pub const fn focus(&self) -> Option<Focus> {
        self.focus
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn editor_with(rows: &[(&str, &str)]) -> KeyValueEditor {
        let pairs: Vec<_> = rows.iter().map(|(k, v)| KeyValuePair::new(*k, *v)).collect();
        let mut editor = KeyValueEditor::new();
        editor.ensure_initialized();
        editor.load(&pairs);
        editor
    }

    #[test]
    fn test_load_leaves_hidden_editor_uninitialized() {
        let mut editor = KeyValueEditor::new();
        editor.load(&[KeyValuePair::new("q", "rust")]);

        assert!(!editor.is_initialized());
        assert_eq!(editor.rows().len(), 1);

        editor.ensure_initialized();
        assert_eq!(editor.get_data().get("q"), Some("rust"));
        assert_eq!(editor.rows().len(), 1);
    }

    #[test]
    fn test_load_nothing_into_shown_editor_keeps_one_row() {
        let mut editor = editor_with(&[("a", "1"), ("b", "2")]);
        editor.load(&[]);

        assert!(editor.is_initialized());
        assert_eq!(editor.rows().len(), 1);
        assert!(editor.get_data().is_empty());
    }

    #[test]
    fn test_initialization_creates_one_row() {
        let mut editor = KeyValueEditor::new();
        assert!(!editor.is_initialized());
        assert!(editor.rows().is_empty());

        editor.ensure_initialized();
        editor.ensure_initialized();

        assert!(editor.is_initialized());
        assert_eq!(editor.rows().len(), 1);
        assert_eq!(editor.focus(), None);
    }

    #[test]
    fn test_add_row_focuses_key() {
        let mut editor = KeyValueEditor::new();
        editor.ensure_initialized();

        let id = editor.add_row();

        assert_eq!(editor.rows().len(), 2);
        assert_eq!(editor.rows()[1], KeyValueRow::blank(id));
        assert_eq!(
            editor.focus(),
            Some(Focus {
                row: id,
                field: Field::Key
            })
        );
    }

    #[test]
    fn test_delete_last_row_clears_it() {
        let mut editor = editor_with(&[("k", "v")]);
        let id = editor.row_at(0).unwrap();

        assert!(editor.delete_row(id));

        assert_eq!(editor.rows().len(), 1);
        assert_eq!(editor.rows()[0].key, "");
        assert_eq!(editor.rows()[0].value, "");
        assert_eq!(editor.rows()[0].id, id);
    }

    #[test]
    fn test_delete_unknown_row_is_noop() {
        let mut editor = editor_with(&[("a", "1")]);
        assert!(!editor.delete_row(RowId(999)));
        assert_eq!(editor.rows().len(), 1);
    }

    #[test]
    fn test_row_count_never_drops_below_one() {
        let mut editor = KeyValueEditor::new();
        editor.ensure_initialized();

        for step in 0..20 {
            if step % 3 == 0 {
                editor.add_row();
            } else {
                let first = editor.row_at(0).unwrap();
                editor.delete_row(first);
            }
            assert!(!editor.rows().is_empty());
        }
    }

    #[test]
    fn test_get_data_last_write_wins() {
        let editor = editor_with(&[("a", "1"), ("b", "2"), ("a", "3")]);
        let data = editor.get_data();

        assert_eq!(data.get("a"), Some("3"));
        assert_eq!(data.get("b"), Some("2"));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_get_data_trims_and_skips_blank_keys() {
        let editor = editor_with(&[("", "x"), ("  k ", " v "), ("   ", "y")]);
        let data = editor.get_data();

        let expected: KeyValueMap = [("k", "v")].into_iter().collect();
        assert_eq!(data, expected);
    }

    #[test]
    fn test_clear_leaves_one_blank_row() {
        let mut editor = editor_with(&[("a", "1"), ("b", "2")]);
        editor.clear();

        assert_eq!(editor.rows().len(), 1);
        assert!(editor.get_data().is_empty());
    }

    #[test]
    fn test_set_key_and_value() {
        let mut editor = KeyValueEditor::new();
        let row = editor.last_row();

        assert!(editor.set_key(row, "Accept"));
        assert!(editor.set_value(row, "text/html"));
        assert!(!editor.set_key(RowId(42), "nope"));

        assert_eq!(editor.get_data().get("Accept"), Some("text/html"));
    }
}
