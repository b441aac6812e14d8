//! Key/value types shared by headers, query parameters and form fields.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One editable key/value row as it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyValuePair {
    /// The key (header name, parameter name, form field name).
    pub key: String,
    /// The value.
    pub value: String,
}

impl KeyValuePair {
    /// Creates a new pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Insertion-ordered mapping from key to value.
///
/// Inserting an existing key replaces its value but keeps the position of the
/// first occurrence, so collapsing rows `a, b, a` yields `a, b` with the last
/// value written for `a`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyValueMap {
    entries: IndexMap<String, String>,
}

impl KeyValueMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Returns the value stored for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if a key matches `name` ignoring ASCII case.
    #[must_use]
    pub fn contains_key_ignore_case(&self, name: &str) -> bool {
        self.entries.keys().any(|k| k.eq_ignore_ascii_case(name))
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the entries as persisted pairs, in order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<KeyValuePair> {
        self.iter().map(|(k, v)| KeyValuePair::new(k, v)).collect()
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValueMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl From<&[KeyValuePair]> for KeyValueMap {
    fn from(pairs: &[KeyValuePair]) -> Self {
        pairs
            .iter()
            .map(|p| (p.key.clone(), p.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overwrite_keeps_first_position() {
        let map: KeyValueMap = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_contains_key_ignore_case() {
        let map: KeyValueMap = [("Content-Type", "text/plain")].into_iter().collect();
        assert!(map.contains_key_ignore_case("content-type"));
        assert!(!map.contains_key_ignore_case("accept"));
    }

    #[test]
    fn test_serializes_as_object() {
        let map: KeyValueMap = [("x", "1")].into_iter().collect();
        let json = serde_json::to_string(&map).unwrap_or_default();
        assert_eq!(json, r#"{"x":"1"}"#);
    }
}
