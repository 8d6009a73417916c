//! Bearer-token handling
//!
//! The backend issues a JWT from `POST /login`; every authenticated route
//! expects it back as `Authorization: Bearer <token>`. The client treats
//! the token as opaque.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ApiError;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with fixed tokens.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token.
    async fn access_token(&self) -> Result<String, ApiError>;
}

/// In-memory token store, filled by a successful login and cleared on
/// logout. Process-local only; nothing is persisted.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, token: impl Into<String> + Send) {
        *self.token.write().await = Some(token.into());
    }

    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    pub async fn get(&self) -> Option<String> {
        self.token.read().await.clone()
    }
}

#[async_trait]
impl AccessTokenProvider for TokenStore {
    async fn access_token(&self) -> Result<String, ApiError> {
        self.get()
            .await
            .ok_or_else(|| ApiError::Auth("no access token held; call login first".to_string()))
    }
}
