//! Request specification type

use url::Url;

use super::{HttpMethod, KeyValueMap, RequestBody};
use crate::error::{DomainError, DomainResult};

static NO_BODY: RequestBody = RequestBody::None;

/// Complete specification for an outbound HTTP request.
///
/// Built fresh from editor state at send time; never persisted as such.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Target URL as typed, without the editor query parameters
    pub url: String,
    /// HTTP headers, last write wins
    pub headers: KeyValueMap,
    /// Query parameters appended to the URL at dispatch
    pub query_params: KeyValueMap,
    /// Request body
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: KeyValueMap::new(),
            query_params: KeyValueMap::new(),
            body: RequestBody::None,
        }
    }

    /// Parses the URL and appends the query parameters to its query string.
    ///
    /// Parameters are appended in iteration order after any query the URL
    /// already carries, form-URL-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the URL is not absolute or is malformed.
    pub fn build_url(&self) -> DomainResult<Url> {
        let mut url = Url::parse(self.url.trim())
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.url)))?;

        if !self.query_params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self.query_params.iter() {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// Returns the body to put on the wire.
    ///
    /// GET and HEAD requests never carry a body.
    #[must_use]
    pub fn dispatch_body(&self) -> &RequestBody {
        if self.method.allows_body() {
            &self.body
        } else {
            &NO_BODY
        }
    }

    /// Returns the content type to add automatically, if the user did not set one.
    #[must_use]
    pub fn implied_content_type(&self) -> Option<&'static str> {
        if self.headers.contains_key_ignore_case("content-type") {
            return None;
        }
        self.dispatch_body().default_content_type()
    }
}
