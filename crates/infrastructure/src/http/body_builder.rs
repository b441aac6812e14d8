//! HTTP request body builder.
//!
//! Turns the domain `RequestBody` into something reqwest can attach.

use antiposta_domain::request::{KeyValueMap, RequestBody};
use reqwest::multipart::Form;

/// Error type for body building operations.
#[derive(Debug, thiserror::Error)]
pub enum BodyBuildError {
    /// Serialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// What failed
        message: String,
    },
}

/// Result of building a body.
pub enum BuiltBody {
    /// No body.
    None,
    /// Encoded text (JSON, URL-encoded form or raw text).
    Text(String),
    /// Multipart form data.
    Multipart(Form),
}

/// Encodes a request body.
///
/// JSON is written compact. Content types are not decided here; see
/// `RequestSpec::implied_content_type`.
///
/// # Errors
///
/// Returns an error if JSON or URL encoding fails.
pub fn build_body(body: &RequestBody) -> Result<BuiltBody, BodyBuildError> {
    match body {
        RequestBody::None => Ok(BuiltBody::None),

        RequestBody::Json(value) => serde_json::to_string(value)
            .map(BuiltBody::Text)
            .map_err(|e| BodyBuildError::Serialization {
                message: e.to_string(),
            }),

        RequestBody::Text(content) => Ok(BuiltBody::Text(content.clone())),

        RequestBody::UrlEncoded(fields) => serde_urlencoded::to_string(fields)
            .map(BuiltBody::Text)
            .map_err(|e| BodyBuildError::Serialization {
                message: e.to_string(),
            }),

        RequestBody::Form(fields) => Ok(BuiltBody::Multipart(build_multipart_form(fields))),
    }
}

/// Build a multipart form from text fields, in map order.
fn build_multipart_form(fields: &KeyValueMap) -> Form {
    fields.iter().fold(Form::new(), |form, (name, value)| {
        form.text(name.to_string(), value.to_string())
    })
}

impl BuiltBody {
    /// Check if this is a multipart form.
    #[must_use]
    pub const fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }

    /// Check if this body is empty/none.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn text(body: BuiltBody) -> String {
        match body {
            BuiltBody::Text(content) => content,
            _ => panic!("Expected Text body"),
        }
    }

    #[test]
    fn test_json_is_compact() {
        let body = RequestBody::Json(serde_json::json!({"key": "value", "n": [1, 2]}));
        assert_eq!(
            text(build_body(&body).unwrap()),
            r#"{"key":"value","n":[1,2]}"#
        );
    }

    #[test]
    fn test_text_is_verbatim() {
        let body = RequestBody::Text("  Hello, World!\n".to_string());
        assert_eq!(text(build_body(&body).unwrap()), "  Hello, World!\n");
    }

    #[test]
    fn test_urlencoded_keeps_order_and_escapes() {
        let fields: KeyValueMap = [("username", "john doe"), ("next", "/a&b")]
            .into_iter()
            .collect();
        let body = RequestBody::UrlEncoded(fields);
        assert_eq!(
            text(build_body(&body).unwrap()),
            "username=john+doe&next=%2Fa%26b"
        );
    }

    #[test]
    fn test_form_is_multipart() {
        let fields: KeyValueMap = [("a", "1")].into_iter().collect();
        let built = build_body(&RequestBody::Form(fields)).unwrap();
        assert!(built.is_multipart());
        assert!(build_body(&RequestBody::None).unwrap().is_none());
    }
}
