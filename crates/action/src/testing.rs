//! Test doubles for the request capability.

use async_trait::async_trait;
use http::StatusCode;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::{HttpRequest, HttpResponse, RequestClient};

/// A [`RequestClient`] that records every request and answers with a fixed
/// outcome (`200 OK` with an empty body unless configured otherwise).
#[derive(Debug)]
pub struct RecordingClient {
    requests: Mutex<Vec<HttpRequest>>,
    outcome: Result<HttpResponse, TransportError>,
}

impl RecordingClient {
    /// Answer every request with `200 OK`.
    pub fn new() -> Self {
        Self::responding(HttpResponse::empty(StatusCode::OK))
    }

    /// Answer every request with `response`.
    pub fn responding(response: HttpResponse) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            outcome: Ok(response),
        }
    }

    /// Answer every request with a JSON body.
    pub fn responding_json(status: StatusCode, body: &Value) -> Self {
        Self::responding(HttpResponse::with_json(status, body))
    }

    /// Fail every request with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            outcome: Err(error),
        }
    }

    /// Snapshot of the requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

impl Default for RecordingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RequestClient for RecordingClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        self.outcome.clone()
    }
}
