//! Error types for the glueop CLI

use thiserror::Error;

/// Result type alias for glueop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors.
///
/// `Timeout` and `RateLimited` are retryable: the paginator reacts to them
/// with page-size back-off and a fixed delay. Everything else aborts the
/// current operation immediately, preserving the upstream detail text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}. Run `glueop init` to set up credentials.")]
    Auth(String),

    #[error("Server-side timeout: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Page size exhausted: server kept timing out down to a single-record page")]
    PageSizeExhausted,

    #[error("Retry limit reached while fetching a page")]
    RetryLimitReached,
}

impl ApiError {
    /// Whether the paginator may retry the same page after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Timeout(_) | ApiError::RateLimited(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `glueop init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("API key not configured. Run `glueop init` or pass --login.")]
    MissingApiKey,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
