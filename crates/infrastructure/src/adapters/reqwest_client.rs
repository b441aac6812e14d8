//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the application.

use std::error::Error as _;
use std::future::Future;
use std::time::Instant;

use antiposta_application::ports::{HttpClient, HttpClientError};
use antiposta_domain::{
    request::{HttpMethod, RequestSpec},
    response::HttpResponse,
};
use reqwest::{Client, Method};

use crate::http::{BuiltBody, build_body};

const MAX_REDIRECTS: usize = 10;

/// Returns the default `User-Agent` header value.
#[must_use]
pub fn default_user_agent() -> String {
    format!("Antiposta/{}", env!("CARGO_PKG_VERSION"))
}

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` and implements the `HttpClient` port from the
/// application layer. No timeout is applied; a send lasts as long as the
/// server takes.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with the default user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        Self::with_user_agent(&default_user_agent())
    }

    /// Creates a new HTTP client sending the given `User-Agent`.
    ///
    /// Redirects are followed up to ten times.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_user_agent(user_agent: &str) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Builds the full reqwest request from a spec.
    fn build_request(
        &self,
        request: &RequestSpec,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        let url = request
            .build_url()
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(content_type) = request.implied_content_type() {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }

        let body = build_body(request.dispatch_body())
            .map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;

        Ok(match body {
            BuiltBody::None => builder,
            BuiltBody::Text(content) => builder.body(content),
            BuiltBody::Multipart(form) => builder.multipart(form),
        })
    }

    /// Joins an error and its sources into one message.
    fn error_chain(error: &reqwest::Error) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        let message = Self::error_chain(error);
        let lowered = message.to_lowercase();
        let host = error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string();

        if error.is_builder() {
            return HttpClientError::Other(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if lowered.contains("certificate") || lowered.contains("tls") {
            return HttpClientError::Tls(message);
        }

        if error.is_connect() {
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(reqwest::Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        HttpClientError::Other(message)
    }
}

impl HttpClient for ReqwestHttpClient {
    fn send(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<HttpResponse, HttpClientError>> + Send {
        let built = self.build_request(request);

        async move {
            let builder = built?;
            let start = Instant::now();

            let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

            let status = response.status();

            let headers: Vec<(String, String)> = response
                .headers()
                .iter()
                .map(|(k, v)| {
                    (
                        k.to_string(),
                        String::from_utf8_lossy(v.as_bytes()).into_owned(),
                    )
                })
                .collect();

            let body = match response.bytes().await {
                Ok(bytes) => Ok(bytes.to_vec()),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read response body");
                    Err(Self::error_chain(&e))
                }
            };

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                headers,
                body,
                duration: start.elapsed(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use antiposta_domain::request::RequestBody;

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Get),
            Method::GET
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch),
            Method::PATCH
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Head),
            Method::HEAD
        );
        assert_eq!(
            ReqwestHttpClient::to_reqwest_method(HttpMethod::Options),
            Method::OPTIONS
        );
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
        assert!(default_user_agent().starts_with("Antiposta/"));
    }

    #[test]
    fn test_build_request_sets_url_headers_and_body() {
        let client = ReqwestHttpClient::new().unwrap();
        let mut spec = RequestSpec::get("https://example.com/items");
        spec.method = HttpMethod::Post;
        spec.query_params.insert("page", "2");
        spec.headers.insert("X-Trace", "abc");
        spec.body = RequestBody::Json(serde_json::json!({"a": 1}));

        let request = client.build_request(&spec).unwrap().build().unwrap();

        assert_eq!(request.url().as_str(), "https://example.com/items?page=2");
        assert_eq!(request.headers()["x-trace"], "abc");
        assert_eq!(request.headers()["content-type"], "application/json");
        assert_eq!(
            request.body().and_then(reqwest::Body::as_bytes),
            Some(br#"{"a":1}"#.as_slice())
        );
    }

    #[test]
    fn test_get_request_has_no_body() {
        let client = ReqwestHttpClient::new().unwrap();
        let mut spec = RequestSpec::get("https://example.com");
        spec.body = RequestBody::Text("ignored".to_string());

        let request = client.build_request(&spec).unwrap().build().unwrap();

        assert!(request.body().is_none());
        assert!(request.headers().get("content-type").is_none());
    }

    #[test]
    fn test_invalid_url_is_reported() {
        let client = ReqwestHttpClient::new().unwrap();
        let spec = RequestSpec::get("not a url");
        assert!(matches!(
            client.build_request(&spec),
            Err(HttpClientError::InvalidUrl(_))
        ));
    }
}
