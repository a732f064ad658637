//! # Courier HTTP
//!
//! A [`RequestClient`] backed by `reqwest`.
//!
//! Hosts hand a [`ReqwestClient`] to
//! [`ActionRegistry::dispatch`](courier_action::ActionRegistry::dispatch).
//! It owns the connection pool and the per-request timeout. It never
//! retries; a non-success status comes back as
//! [`TransportError::Status`] with the response body attached.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use courier_action::{HttpRequest, HttpResponse, RequestClient, TransportError};
use serde::{Deserialize, Serialize};

/// Transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Whole-request timeout, in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("courier/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

/// Request capability sending real HTTP requests.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// A client with [`ClientConfig::default`].
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(&ClientConfig::default())
    }

    /// A client with explicit settings.
    pub fn with_config(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("failed to build client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RequestClient for ReqwestClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let (method, url, headers, json) = request.into_parts();

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = &json {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify)?;

        tracing::debug!(%status, bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(TransportError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(HttpResponse::new(status, headers, body))
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else if error.is_builder() {
        TransportError::InvalidRequest(error.to_string())
    } else {
        TransportError::Network(error.to_string())
    }
}
