//! HTTP Request body types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::KeyValueMap;
use crate::error::{ChoiceError, DomainError, DomainResult};

/// The body kind selected in the body tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    /// No body
    #[default]
    None,
    /// JSON text, validated before sending
    Json,
    /// Multipart form built from the form editor
    Form,
    /// URL-encoded form built from the form editor
    UrlEncoded,
    /// Raw text sent verbatim
    Text,
}

impl BodyType {
    /// Returns all body types in selector order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::None,
            Self::Json,
            Self::Form,
            Self::UrlEncoded,
            Self::Text,
        ]
    }

    /// Returns the selector value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Json => "json",
            Self::Form => "form",
            Self::UrlEncoded => "urlencoded",
            Self::Text => "text",
        }
    }

    /// Returns true if the form key/value editor backs this body type.
    #[must_use]
    pub const fn uses_form_editor(self) -> bool {
        matches!(self, Self::Form | Self::UrlEncoded)
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "json" => Ok(Self::Json),
            "form" => Ok(Self::Form),
            "urlencoded" => Ok(Self::UrlEncoded),
            "text" => Ok(Self::Text),
            other => Err(ChoiceError::UnsupportedBodyType(other.to_string())),
        }
    }
}

/// A request body ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    None,
    /// Parsed JSON document
    Json(serde_json::Value),
    /// Multipart form fields
    Form(KeyValueMap),
    /// URL-encoded form fields
    UrlEncoded(KeyValueMap),
    /// Raw text
    Text(String),
}

impl RequestBody {
    /// Builds a body from the editor contents for the selected body type.
    ///
    /// JSON text is trimmed first; empty text yields no body.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidJsonBody`] if `body_type` is JSON and
    /// the text does not parse.
    pub fn from_editors(
        body_type: BodyType,
        json_text: &str,
        text: &str,
        form: &KeyValueMap,
    ) -> DomainResult<Self> {
        match body_type {
            BodyType::None => Ok(Self::None),
            BodyType::Json => {
                let trimmed = json_text.trim();
                if trimmed.is_empty() {
                    return Ok(Self::None);
                }
                serde_json::from_str(trimmed)
                    .map(Self::Json)
                    .map_err(|e| DomainError::InvalidJsonBody(e.to_string()))
            }
            BodyType::Form => Ok(Self::Form(form.clone())),
            BodyType::UrlEncoded => Ok(Self::UrlEncoded(form.clone())),
            BodyType::Text => Ok(Self::Text(text.to_string())),
        }
    }

    /// Returns true if there is nothing to send.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the content type to add when the user did not set one.
    ///
    /// Multipart forms return `None` because the boundary is chosen by the
    /// HTTP client.
    #[must_use]
    pub const fn default_content_type(&self) -> Option<&'static str> {
        match self {
            Self::None | Self::Form(_) => None,
            Self::Json(_) => Some("application/json"),
            Self::UrlEncoded(_) => Some("application/x-www-form-urlencoded"),
            Self::Text(_) => Some("text/plain;charset=UTF-8"),
        }
    }
}
