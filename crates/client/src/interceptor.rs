//! Request/response interceptors
//!
//! Observe-only hooks around each dispatched request. `on_request` runs
//! strictly before dispatch and `on_response` strictly after receipt; the
//! same [`RequestInfo`] instance is handed to both, so the pairing stays
//! associated with its own request even when invocations overlap.
//!
//! Hooks take shared references and return nothing: an interceptor cannot
//! alter request or response semantics, only observe them. Interceptors run
//! in registration order.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use tracing::info;
use uuid::Uuid;

/// Identity of one in-flight request.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    id: Uuid,
    method: Method,
    path: String,
}

impl RequestInfo {
    pub(crate) fn new(method: Method, path: &str) -> Self {
        Self { id: Uuid::new_v4(), method, path: path.to_string() }
    }

    /// Unique id generated for this request.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Observe-only hook pair around a request.
pub trait Interceptor: Send + Sync {
    /// Called once per request, before dispatch.
    fn on_request(&self, request: &RequestInfo);

    /// Called once per request, after the response arrived.
    fn on_response(&self, request: &RequestInfo, status: StatusCode, elapsed: Duration);
}

/// Logs every request/response pair through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingInterceptor;

impl Interceptor for LoggingInterceptor {
    fn on_request(&self, request: &RequestInfo) {
        info!(
            request_id = %request.id(),
            method = %request.method(),
            path = request.path(),
            "request started"
        );
    }

    fn on_response(&self, request: &RequestInfo, status: StatusCode, elapsed: Duration) {
        info!(
            request_id = %request.id(),
            method = %request.method(),
            path = request.path(),
            status = status.as_u16(),
            duration = ?elapsed,
            "request completed"
        );
    }
}
