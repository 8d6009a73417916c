//! Client configuration
//!
//! Loads API client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables (`.env` honored)
//! 2. If `CARTAGE_API_URL` is absent, falls back to built-in defaults
//! 3. An explicit TOML file can be loaded with [`load_from_file`]
//!
//! ## Environment Variables
//! - `CARTAGE_API_URL`: Base URL of the backend
//! - `CARTAGE_API_TIMEOUT_SECS`: Transport timeout in seconds
//! - `CARTAGE_API_USER_AGENT`: Optional user agent string

use std::path::Path;
use std::time::Duration;

use cartage_domain::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use cartage_domain::{CartageError, Result};
use serde::Deserialize;

/// Configuration for the API client.
///
/// Immutable after construction; created once at process start and shared
/// for the process lifetime.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL for the API (e.g., "http://localhost:3000")
    pub base_url: String,
    /// Transport timeout for each request
    pub timeout: Duration,
    /// Optional user agent attached to every request
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// Build a configuration for the given base URL with default timeout.
    ///
    /// # Errors
    /// Returns `CartageError::InvalidInput` if the URL is empty or not a
    /// valid http(s) URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = validate_base_url(&base_url.into())?;
        Ok(Self { base_url, ..Self::default() })
    }

    /// Override the transport timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }
}

/// Normalize and validate a base URL. Trailing slashes are stripped so path
/// concatenation stays unambiguous.
fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CartageError::InvalidInput("base URL must not be empty".to_string()));
    }

    let parsed = url::Url::parse(trimmed)
        .map_err(|e| CartageError::InvalidInput(format!("invalid base URL '{trimmed}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CartageError::InvalidInput(format!(
            "base URL must be http or https, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the base URL
/// variable is not set, falls back to built-in defaults.
///
/// # Errors
/// Returns `CartageError::Config` if variables are present but malformed.
pub fn load() -> Result<ApiConfig> {
    // Pick up a .env file when one exists; absence is not an error
    dotenvy::dotenv().ok();

    if std::env::var("CARTAGE_API_URL").is_err() {
        tracing::debug!("CARTAGE_API_URL not set, using default configuration");
        return Ok(ApiConfig::default());
    }

    let config = load_from_env()?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Load configuration from environment variables
///
/// `CARTAGE_API_URL` must be present; the other variables are optional.
///
/// # Errors
/// Returns `CartageError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<ApiConfig> {
    let base_url = validate_base_url(&env_var("CARTAGE_API_URL")?)?;

    let timeout = match std::env::var("CARTAGE_API_TIMEOUT_SECS") {
        Ok(raw) => {
            let secs = raw
                .parse::<u64>()
                .map_err(|e| CartageError::Config(format!("Invalid timeout: {e}")))?;
            Duration::from_secs(secs)
        }
        Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    };

    let user_agent = std::env::var("CARTAGE_API_USER_AGENT").ok();

    Ok(ApiConfig { base_url, timeout, user_agent })
}

/// Load configuration from a TOML file
///
/// # Errors
/// Returns `CartageError::Config` if the file cannot be read or parsed.
pub fn load_from_file(path: &Path) -> Result<ApiConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CartageError::Config(format!("Failed to read config file {}: {e}", path.display()))
    })?;

    let file: FileConfig = toml::from_str(&contents).map_err(|e| {
        CartageError::Config(format!("Failed to parse config file {}: {e}", path.display()))
    })?;

    let base_url = validate_base_url(&file.api.base_url)?;
    let timeout = Duration::from_secs(file.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

    Ok(ApiConfig { base_url, timeout, user_agent: file.api.user_agent })
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| CartageError::Config(format!("missing environment variable: {name}")))
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    api: FileApiSection,
}

#[derive(Debug, Deserialize)]
struct FileApiSection {
    base_url: String,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
}
