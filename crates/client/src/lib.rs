//! # Cartage Client
//!
//! Typed HTTP client for the Cartage ULD-management API.
//!
//! This crate contains:
//! - Client configuration with env-first loading
//! - A thin HTTP transport over one shared reqwest client
//! - Observe-only request/response interceptors
//! - Bearer-token handling filled from the login operation
//! - One typed method per backend operation
//!
//! ## Architecture
//! - One `ApiClient` per process, explicitly constructed and passed around
//! - Transport failures and application failures stay distinct end to end
//! - No automatic retry or recovery; callers layer that externally

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod interceptor;

// Re-export commonly used items
pub use auth::{AccessTokenProvider, TokenStore};
pub use client::{ApiClient, ApiClientBuilder, ApiSuccess};
pub use config::ApiConfig;
pub use errors::{ApiError, ErrorBody};
pub use http::{HttpClient, HttpClientBuilder};
pub use interceptor::{Interceptor, LoggingInterceptor, RequestInfo};
