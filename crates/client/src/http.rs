//! HTTP transport
//!
//! One shared `reqwest::Client` carrying the default header set and the
//! configured timeout. `send` performs exactly one attempt: there is no
//! retry, backoff, or recovery here. Each request's lifecycle is
//! independent and failure handling belongs to the caller.

use std::time::Duration;

use cartage_domain::constants::CONTENT_TYPE_JSON;
use cartage_domain::CartageError;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

/// Thin wrapper over the shared reqwest client.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    timeout: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, CartageError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder. Exactly one attempt.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, CartageError> {
        let request = builder
            .build()
            .map_err(|err| CartageError::Internal(format!("failed to build request: {err}")))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) if err.is_timeout() => Err(CartageError::Network(format!(
                "request to {url} timed out after {:?}",
                self.timeout
            ))),
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(CartageError::Network(format!("http request failed: {err}")))
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(30), user_agent: None, default_headers: None }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient, CartageError> {
        // Every request body and response body on this API is JSON
        let mut headers = self.default_headers.unwrap_or_default();
        headers
            .entry(CONTENT_TYPE)
            .or_insert_with(|| HeaderValue::from_static(CONTENT_TYPE_JSON));

        let mut builder =
            ReqwestClient::builder().timeout(self.timeout).no_proxy().default_headers(headers);

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder
            .build()
            .map_err(|err| CartageError::Internal(format!("failed to build http client: {err}")))?;

        Ok(HttpClient { client, timeout: self.timeout })
    }
}
