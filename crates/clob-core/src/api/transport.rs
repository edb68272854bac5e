//! Raw request execution against the CLOB.
//!
//! The core only needs "method, path, body, auth headers -> response bytes".
//! [`ClobClient`] is the reqwest-backed implementation; tests substitute
//! their own executor.

use std::time::Duration as StdDuration;

use tracing::{debug, warn};
use url::Url;

use crate::signing::AuthHeaders;
use crate::{Error, Result};

/// HTTP methods used by the CLOB endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    /// Upper-case name, as included in the L2 HMAC message.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to send: the body is already serialized and signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: HttpMethod,
    /// Path including any query string, e.g. `/tick-size?token_id=1`.
    pub path: String,
    pub body: Option<String>,
    pub headers: AuthHeaders,
}

impl RawRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: AuthHeaders::None,
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn headers(mut self, headers: AuthHeaders) -> Self {
        self.headers = headers;
        self
    }
}

/// Executes raw requests and returns the response body.
///
/// Implementations must not retry. Non-success responses are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, request: RawRequest) -> Result<Vec<u8>>;
}

/// Polymarket CLOB HTTP client.
pub struct ClobClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl ClobClient {
    /// Default CLOB API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://clob.polymarket.com";

    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a client for the given host with a per-request timeout.
    #[allow(clippy::result_large_err)]
    pub fn new(base_url: Option<&str>, timeout: StdDuration) -> Result<Self> {
        let base_url = base_url.unwrap_or(Self::DEFAULT_BASE_URL);
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid CLOB URL {}: {}", base_url, e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(StdDuration::from_secs(10))
            .build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    #[allow(clippy::result_large_err)]
    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::config(format!("Invalid request path {}: {}", path, e)))
    }
}

#[async_trait::async_trait]
impl RequestExecutor for ClobClient {
    async fn execute(&self, request: RawRequest) -> Result<Vec<u8>> {
        let url = self.url(&request.path)?;

        let mut builder = match request.method {
            HttpMethod::Get => self.http_client.get(url),
            HttpMethod::Post => self.http_client.post(url),
            HttpMethod::Delete => self.http_client.delete(url),
        };

        for (name, value) in request.headers.to_pairs() {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder
                .header("Content-Type", "application/json")
                .body(body);
        }

        debug!(method = %request.method, path = %request.path, "Sending CLOB request");

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(
                method = %request.method,
                path = %request.path,
                status = status.as_u16(),
                "CLOB request failed"
            );
            return Err(Error::Api {
                message: format!("{} {} failed: {} - {}", request.method, request.path, status, text),
                status: Some(status.as_u16()),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl std::fmt::Debug for ClobClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClobClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
