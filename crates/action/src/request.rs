//! The request capability port.
//!
//! Actions never construct their own transport. The host supplies a
//! [`RequestClient`] to [`dispatch`](crate::registry::ActionRegistry::dispatch)
//! and the action reaches it through
//! [`ExecutionContext::send`](crate::context::ExecutionContext::send).
//! Timeouts, retries, connection pooling and cancellation all belong to the
//! client implementation.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::TransportError;

/// One outbound request built by an action.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    json: Option<Value>,
}

impl HttpRequest {
    /// A request with no headers and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            json: None,
        }
    }

    /// A `POST` request.
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Add a header, replacing any previous value for `name`.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL, query string included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// JSON body, if any.
    pub fn body(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Split into parts for a transport implementation.
    pub fn into_parts(self) -> (Method, Url, HeaderMap, Option<Value>) {
        (self.method, self.url, self.headers, self.json)
    }
}

/// Response returned by a [`RequestClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl HttpResponse {
    /// Build a response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// An empty response with the given status.
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, HeaderMap::new(), Bytes::new())
    }

    /// A response carrying a JSON body.
    pub fn with_json(status: StatusCode, body: &Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Self::new(status, headers, body.to_string())
    }

    /// Response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Host-supplied capability that performs one HTTP request.
#[async_trait]
pub trait RequestClient: Send + Sync {
    /// Send `request` and return the response.
    ///
    /// Implementations report non-success statuses as
    /// [`TransportError::Status`].
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: RequestClient + ?Sized> RequestClient for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn post_builder() {
        let url = Url::parse("https://example.com/events?x=1").unwrap();
        let req = HttpRequest::post(url.clone())
            .json(json!({"a": 1}))
            .header(
                HeaderName::from_static("x-api-key"),
                HeaderValue::from_static("k"),
            );
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.url(), &url);
        assert_eq!(req.body(), Some(&json!({"a": 1})));
        assert_eq!(req.headers().get("x-api-key").unwrap(), "k");
    }

    #[test]
    fn response_helpers() {
        let resp = HttpResponse::with_json(StatusCode::OK, &json!({"ok": true}));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.text(), r#"{"ok":true}"#);
        let parsed: Value = resp.json().unwrap();
        assert_eq!(parsed, json!({"ok": true}));
        assert_eq!(
            resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn empty_response_has_no_body() {
        let resp = HttpResponse::empty(StatusCode::NO_CONTENT);
        assert!(resp.bytes().is_empty());
        assert_eq!(resp.text(), "");
    }
}
