//! Collections and environments

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::request::SavedRequest;

/// A named group of saved requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Collection {
    /// Collection name
    pub name: String,
    /// Saved requests, in insertion order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requests: Vec<SavedRequest>,
}

impl Collection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requests: Vec::new(),
        }
    }

    /// Adds a request, replacing any existing request with the same name in place.
    pub fn upsert(&mut self, request: SavedRequest) {
        if let Some(existing) = self.requests.iter_mut().find(|r| r.name == request.name) {
            *existing = request;
        } else {
            self.requests.push(request);
        }
    }

    /// Finds a request by name.
    #[must_use]
    pub fn request(&self, name: &str) -> Option<&SavedRequest> {
        self.requests.iter().find(|r| r.name == name)
    }
}

/// Finds a collection by name, creating it at the end if missing.
pub fn collection_mut<'a>(collections: &'a mut Vec<Collection>, name: &str) -> &'a mut Collection {
    let index = match collections.iter().position(|c| c.name == name) {
        Some(index) => index,
        None => {
            collections.push(Collection::new(name));
            collections.len() - 1
        }
    };
    &mut collections[index]
}

/// A named set of variables.
///
/// Stored and listed only; values are never substituted into requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name
    pub name: String,
    /// Variables, in insertion order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_name_only_collection_round_trips() {
        let parsed: Vec<Collection> = serde_json::from_str(r#"[{"name":"x"}]"#).unwrap();
        assert_eq!(parsed, vec![Collection::new("x")]);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"[{"name":"x"}]"#);
    }

    #[test]
    fn test_upsert_replaces_by_name() {
        let mut collection = Collection::new("api");
        collection.upsert(SavedRequest {
            name: "list".to_string(),
            url: "https://a".to_string(),
            ..SavedRequest::default()
        });
        collection.upsert(SavedRequest {
            name: "list".to_string(),
            url: "https://b".to_string(),
            ..SavedRequest::default()
        });

        assert_eq!(collection.requests.len(), 1);
        assert_eq!(collection.request("list").map(|r| r.url.as_str()), Some("https://b"));
    }

    #[test]
    fn test_collection_mut_creates_missing() {
        let mut collections = vec![Collection::new("a")];
        collection_mut(&mut collections, "b").upsert(SavedRequest::default());
        collection_mut(&mut collections, "a");

        assert_eq!(collections.len(), 2);
        assert_eq!(collections[1].requests.len(), 1);
    }
}
