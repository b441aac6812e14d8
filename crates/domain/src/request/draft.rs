//! Raw editor state of a request panel.

use super::{BodyType, HttpMethod, KeyValueMap, RequestBody, RequestSpec};
use crate::error::{DomainError, DomainResult};

/// Everything a panel's inputs and editors hold at the moment of sending.
///
/// A draft may be invalid (empty URL, malformed JSON); [`RequestDraft::into_spec`]
/// performs the checks that must happen before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestDraft {
    /// Selected method
    pub method: HttpMethod,
    /// URL input text
    pub url: String,
    /// Headers editor data
    pub headers: KeyValueMap,
    /// Params editor data
    pub query_params: KeyValueMap,
    /// Selected body type
    pub body_type: BodyType,
    /// JSON editor text
    pub json_text: String,
    /// Raw text editor text
    pub text: String,
    /// Form editor data
    pub form: KeyValueMap,
}

impl RequestDraft {
    /// Validates the draft and builds the request to dispatch.
    ///
    /// Checks run in this order: empty URL, body construction, URL parsing.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EmptyUrl`] if the URL is blank
    /// - [`DomainError::InvalidJsonBody`] if the JSON body does not parse
    /// - [`DomainError::InvalidUrl`] if the URL is not absolute
    pub fn into_spec(&self) -> DomainResult<RequestSpec> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(DomainError::EmptyUrl);
        }

        let body =
            RequestBody::from_editors(self.body_type, &self.json_text, &self.text, &self.form)?;

        let spec = RequestSpec {
            method: self.method,
            url: url.to_string(),
            headers: self.headers.clone(),
            query_params: self.query_params.clone(),
            body,
        };

        spec.build_url()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft(url: &str) -> RequestDraft {
        RequestDraft {
            url: url.to_string(),
            ..RequestDraft::default()
        }
    }

    #[test]
    fn test_blank_url_is_rejected() {
        assert_eq!(draft("").into_spec(), Err(DomainError::EmptyUrl));
        assert_eq!(draft("   ").into_spec(), Err(DomainError::EmptyUrl));
    }

    #[test]
    fn test_json_error_reported_before_url_error() {
        let mut d = draft("not a url");
        d.method = HttpMethod::Post;
        d.body_type = BodyType::Json;
        d.json_text = "{bad json".to_string();

        assert!(matches!(d.into_spec(), Err(DomainError::InvalidJsonBody(_))));
    }

    #[test]
    fn test_malformed_json_fails_even_for_get() {
        let mut d = draft("https://example.com");
        d.body_type = BodyType::Json;
        d.json_text = "{bad json".to_string();

        assert!(matches!(d.into_spec(), Err(DomainError::InvalidJsonBody(_))));
    }

    #[test]
    fn test_valid_draft_builds_spec() {
        let mut d = draft("  https://example.com/items  ");
        d.method = HttpMethod::Put;
        d.body_type = BodyType::Text;
        d.text = "hello".to_string();
        d.headers.insert("X-Trace", "1");

        let spec = d.into_spec();
        assert_eq!(
            spec,
            Ok(RequestSpec {
                method: HttpMethod::Put,
                url: "https://example.com/items".to_string(),
                headers: [("X-Trace", "1")].into_iter().collect(),
                query_params: KeyValueMap::new(),
                body: RequestBody::Text("hello".to_string()),
            })
        );
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(matches!(
            draft("example.com/path").into_spec(),
            Err(DomainError::InvalidUrl(_))
        ));
    }
}
