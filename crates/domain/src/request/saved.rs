//! Saved request records stored in collections.

use serde::{Deserialize, Serialize};

use super::{BodyType, HttpMethod, KeyValueMap, KeyValuePair, RequestDraft};

/// A snapshot of a panel's editor state, as stored in a collection.
///
/// Raw editor text is kept (including JSON that does not parse) so that
/// reopening a request restores exactly what was typed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedRequest {
    /// Display name, also used as the tab title
    pub name: String,
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// URL text
    #[serde(default)]
    pub url: String,
    /// Header rows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<KeyValuePair>,
    /// Query parameter rows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<KeyValuePair>,
    /// Selected body type
    #[serde(default)]
    pub body_type: BodyType,
    /// JSON editor text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub json_text: String,
    /// Raw text editor text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Form rows
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<KeyValuePair>,
}

impl SavedRequest {
    /// Captures a draft under a name.
    #[must_use]
    pub fn from_draft(name: impl Into<String>, draft: &RequestDraft) -> Self {
        Self {
            name: name.into(),
            method: draft.method,
            url: draft.url.clone(),
            headers: draft.headers.to_pairs(),
            params: draft.query_params.to_pairs(),
            body_type: draft.body_type,
            json_text: draft.json_text.clone(),
            text: draft.text.clone(),
            form: draft.form.to_pairs(),
        }
    }

    /// Rebuilds the draft this record was captured from.
    #[must_use]
    pub fn to_draft(&self) -> RequestDraft {
        RequestDraft {
            method: self.method,
            url: self.url.clone(),
            headers: KeyValueMap::from(self.headers.as_slice()),
            query_params: KeyValueMap::from(self.params.as_slice()),
            body_type: self.body_type,
            json_text: self.json_text.clone(),
            text: self.text.clone(),
            form: KeyValueMap::from(self.form.as_slice()),
        }
    }
}
