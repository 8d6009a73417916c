//! Authentication wire types

use serde::{Deserialize, Serialize};

/// Body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response. The token is an opaque JWT; the client attaches
/// it as a bearer credential and never inspects the claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}
