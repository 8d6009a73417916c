//! API-specific error types
//!
//! Two failure taxonomies apply to every operation and stay distinct:
//!
//! 1. Transport-level: connectivity or timeout. No HTTP status exists.
//! 2. Application-level: a well-formed non-2xx response carrying the
//!    backend's typed error body.
//!
//! Callers separate the two by inspecting [`ApiError::status`]: only
//! application-level failures carry a status code.

use cartage_domain::CartageError;
use serde::Deserialize;
use thiserror::Error;

/// Wire shape of a backend error response: `{"status": 401, "error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status and a typed error body.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a well-formed response (connectivity,
    /// timeout, interrupted transfer).
    #[error("Network error: {0}")]
    Network(String),

    /// A success response whose body did not match the declared shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Client-side auth precondition failed (no token held).
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of an application-level failure, `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for failures raised below the HTTP layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<CartageError> for ApiError {
    fn from(err: CartageError) -> Self {
        match err {
            CartageError::Network(msg) => Self::Network(msg),
            CartageError::Auth(msg) => Self::Auth(msg),
            CartageError::Config(msg) | CartageError::InvalidInput(msg) => Self::Config(msg),
            other => Self::Network(format!("HTTP error: {other}")),
        }
    }
}
