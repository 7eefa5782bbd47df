//! HTTP transport capability.
//!
//! The node core talks to MakeHub through the [`Transport`] trait so tests
//! and hosts can substitute their own client. [`HttpTransport`] is the
//! reqwest-backed default.

use crate::credentials::Credentials;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::env;
use std::time::Duration;

pub use reqwest::Method;

/// Production MakeHub API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.makehub.ai/v1";

/// HTTP client capability. One call, one JSON in/out exchange; timeouts and
/// cancellation are the implementation's concern, not the caller's.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `method` against `path` (relative to the API base) with an
    /// optional JSON body, returning the parsed JSON response.
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("MakeHub returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Other(String),
}

/// Default transport: reqwest with bearer auth and JSON content type.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Build a transport against the production base URL.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Build a transport against a custom base URL (primarily for testing
    /// with mock servers).
    ///
    /// Validates the credential up front so a missing key fails before any
    /// request is attempted.
    pub fn with_base_url(credentials: &Credentials, base_url: &str) -> Result<Self> {
        credentials.validate()?;

        // Connection-level timeout, env-overridable.
        let timeout_secs = env::var("MAKEHUB_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: credentials.api_key.clone(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = uuid::Uuid::new_v4().to_string();

        let mut req = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            // Correlation id. MakeHub may ignore it, but hosts can use it
            // to link node output to upstream request logs.
            .header("x-makehub-request-id", &request_id);

        if let Some(body) = body {
            req = req.json(body);
        }

        tracing::debug!(%method, %url, %request_id, "sending request to MakeHub");

        let response = req.send().await.map_err(TransportError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "MakeHub request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let json = response.json().await.map_err(TransportError::Http)?;
        Ok(json)
    }
}
