//! Send Request Use Case
//!
//! Turns a panel's editor state into a validated request, dispatches it
//! through the `HttpClient` port and renders the result.

use std::sync::Arc;

use antiposta_domain::{
    DomainError, RequestErrorKind, RequestState,
    request::{RequestDraft, RequestSpec},
    response::ResponseView,
};
use thiserror::Error;

use crate::ports::{HttpClient, HttpClientError};

/// Result type for a send.
pub type SendResult = Result<ResponseView, SendRequestError>;

/// Error type for the send request use case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendRequestError {
    /// URL is empty.
    #[error("URL is required")]
    EmptyUrl,

    /// URL is not an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The JSON body editor holds malformed JSON.
    #[error("Invalid JSON in request body")]
    InvalidJsonBody(String),

    /// HTTP request failed.
    #[error("{0}")]
    Http(#[from] HttpClientError),
}

impl From<DomainError> for SendRequestError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::EmptyUrl => Self::EmptyUrl,
            DomainError::InvalidUrl(msg) => Self::InvalidUrl(msg),
            DomainError::InvalidJsonBody(msg) => Self::InvalidJsonBody(msg),
        }
    }
}

impl SendRequestError {
    /// Returns true if the error was raised before any network call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        !matches!(self, Self::Http(_))
    }

    /// Converts this error to a `RequestState::Error` for UI display.
    #[must_use]
    pub fn to_request_state(&self) -> RequestState {
        match self {
            Self::EmptyUrl => RequestState::error(RequestErrorKind::InvalidUrl, "URL is required"),
            Self::InvalidUrl(msg) => {
                RequestState::error_with_details(RequestErrorKind::InvalidUrl, "Invalid URL", msg)
            }
            Self::InvalidJsonBody(msg) => RequestState::error_with_details(
                RequestErrorKind::InvalidBody,
                "Invalid JSON in request body",
                msg,
            ),
            Self::Http(e) => RequestState::error_with_details(
                e.to_error_kind(),
                e.to_string(),
                e.to_error_kind().title(),
            ),
        }
    }
}

/// Validates a draft and builds the request to dispatch.
///
/// # Errors
///
/// Returns `EmptyUrl`, `InvalidJsonBody` or `InvalidUrl`, checked in that order.
pub fn prepare(draft: &RequestDraft) -> Result<RequestSpec, SendRequestError> {
    draft.into_spec().map_err(|e| {
        tracing::warn!(error = %e, "Request rejected before dispatch");
        SendRequestError::from(e)
    })
}

/// Use case for sending HTTP requests.
///
/// # Example
///
/// ```ignore
/// let client = ReqwestHttpClient::new()?;
/// let use_case = SendRequest::new(Arc::new(client));
///
/// let spec = SendRequest::<ReqwestHttpClient>::prepare(&draft)?;
/// let view = use_case.dispatch(&spec).await?;
/// ```
pub struct SendRequest<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> SendRequest<C> {
    /// Creates a new `SendRequest` use case with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Validates a draft and builds the request to dispatch.
    ///
    /// # Errors
    ///
    /// See [`prepare`].
    pub fn prepare(draft: &RequestDraft) -> Result<RequestSpec, SendRequestError> {
        prepare(draft)
    }

    /// Dispatches a prepared request and renders the response.
    ///
    /// Any HTTP status counts as a completed send.
    ///
    /// # Errors
    ///
    /// Returns `Http` if no response was received.
    pub async fn dispatch(&self, spec: &RequestSpec) -> SendResult {
        tracing::debug!(method = %spec.method, url = %spec.url, "Dispatching request");

        match self.client.send(spec).await {
            Ok(response) => {
                tracing::debug!(
                    status = response.status,
                    duration = ?response.duration,
                    "Response received"
                );
                Ok(ResponseView::from_response(&response))
            }
            Err(e) => {
                tracing::error!(error = %e, url = %spec.url, "Request failed");
                Err(e.into())
            }
        }
    }

    /// Validates, dispatches and renders in one step.
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the network, or `Http`.
    pub async fn execute(&self, draft: &RequestDraft) -> SendResult {
        let spec = Self::prepare(draft)?;
        self.dispatch(&spec).await
    }
}

/// Extension trait for convenient `RequestState` conversion.
pub trait SendResultExt {
    /// Converts the result to a `RequestState` for UI binding.
    fn to_request_state(self) -> RequestState;
}

impl SendResultExt for SendResult {
    fn to_request_state(self) -> RequestState {
        match self {
            Ok(response) => RequestState::success(response),
            Err(e) => e.to_request_state(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use antiposta_domain::request::{BodyType, HttpMethod, RequestBody};
    use antiposta_domain::response::HttpResponse;
    use pretty_assertions::assert_eq;
    use std::future::Future;
    use std::sync::Mutex;

    /// Mock HTTP client recording every request it is handed.
    struct MockHttpClient {
        response: Result<HttpResponse, HttpClientError>,
        sent: Mutex<Vec<RequestSpec>>,
    }

    impl MockHttpClient {
        fn success() -> Self {
            Self {
                response: Ok(HttpResponse::new(
                    200,
                    vec![("content-type".to_string(), "application/json".to_string())],
                    br#"{"ok":true}"#.to_vec(),
                )),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn error(err: HttpClientError) -> Self {
            Self {
                response: Err(err),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<RequestSpec> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn send(
            &self,
            request: &RequestSpec,
        ) -> impl Future<Output = Result<HttpResponse, HttpClientError>> + Send {
            self.sent.lock().unwrap().push(request.clone());
            let result = self.response.clone();
            async move { result }
        }
    }

    fn draft(url: &str) -> RequestDraft {
        RequestDraft {
            url: url.to_string(),
            ..RequestDraft::default()
        }
    }

    #[tokio::test]
    async fn test_execute_success() {
        let client = Arc::new(MockHttpClient::success());
        let use_case = SendRequest::new(Arc::clone(&client));

        let view = use_case
            .execute(&draft("https://api.example.com/test"))
            .await
            .unwrap();

        assert_eq!(view.status.code, 200);
        assert_eq!(view.body.display_text(), "{\n  \"ok\": true\n}");
        assert_eq!(client.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_url_never_reaches_client() {
        let client = Arc::new(MockHttpClient::success());
        let use_case = SendRequest::new(Arc::clone(&client));

        let result = use_case.execute(&draft("  ")).await;

        assert_eq!(result, Err(SendRequestError::EmptyUrl));
        assert!(client.sent().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_never_reaches_client() {
        let client = Arc::new(MockHttpClient::success());
        let use_case = SendRequest::new(Arc::clone(&client));

        let mut d = draft("https://api.example.com");
        d.method = HttpMethod::Post;
        d.body_type = BodyType::Json;
        d.json_text = "{bad json".to_string();

        let err = use_case.execute(&d).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid JSON in request body");
        assert!(err.is_validation());
        assert!(client.sent().is_empty());
    }

    #[tokio::test]
    async fn test_get_with_no_body_type_sends_no_body() {
        let client = Arc::new(MockHttpClient::success());
        let use_case = SendRequest::new(Arc::clone(&client));

        let mut d = draft("https://api.example.com");
        d.text = "leftover".to_string();
        d.json_text = r#"{"a":1}"#.to_string();
        d.form.insert("field", "value");

        use_case.execute(&d).await.unwrap();

        let sent = client.sent();
        assert_eq!(sent[0].body, RequestBody::None);
        assert_eq!(sent[0].dispatch_body(), &RequestBody::None);
    }

    #[tokio::test]
    async fn test_http_error_maps_to_error_state() {
        let client = Arc::new(MockHttpClient::error(HttpClientError::ConnectionRefused {
            host: "localhost".to_string(),
            port: 1,
        }));
        let use_case = SendRequest::new(client);

        let result = use_case.execute(&draft("http://localhost:1")).await;
        assert!(matches!(
            result,
            Err(SendRequestError::Http(HttpClientError::ConnectionRefused { .. }))
        ));

        let state = result.to_request_state();
        assert_eq!(state.status_text(), "Error");
        if let RequestState::Error { kind, message, .. } = state {
            assert_eq!(kind, RequestErrorKind::ConnectionRefused);
            assert_eq!(message, "Connection refused by localhost:1");
        }
    }

    #[test]
    fn test_error_to_request_state() {
        let state = SendRequestError::EmptyUrl.to_request_state();
        assert!(state.is_error());

        if let RequestState::Error { kind, message, .. } = state {
            assert_eq!(kind, RequestErrorKind::InvalidUrl);
            assert_eq!(message, "URL is required");
        }
    }

    #[test]
    fn test_domain_errors_are_validation_errors() {
        let errors = [
            DomainError::EmptyUrl,
            DomainError::InvalidUrl("bad".to_string()),
            DomainError::InvalidJsonBody("eof".to_string()),
        ];
        for error in errors {
            let mapped = SendRequestError::from(error);
            assert!(mapped.is_validation());
            assert!(mapped.to_request_state().is_error());
        }
    }

    #[test]
    fn test_prepare_rejects_relative_url() {
        let result = SendRequest::<MockHttpClient>::prepare(&draft("api/users"));
        assert!(matches!(result, Err(SendRequestError::InvalidUrl(_))));
    }
}
