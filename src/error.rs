//! Typed errors for configuration and API calls.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnv(&'static str),
    #[error("invalid base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("invalid endpoint for {entity}.{operation}: {reason}")]
    InvalidEndpoint {
        entity: String,
        operation: &'static str,
        reason: String,
    },
    #[error("duplicate form field: {0}")]
    DuplicateField(String),
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Non-2xx response; carries the status code and the raw body text.
    #[error("API error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
    /// A `before_delete` hook vetoed the operation.
    #[error("Delete operation cancelled")]
    Cancelled,
    #[error("unknown custom method: {0}")]
    UnknownMethod(String),
    #[error("hook: {0}")]
    Hook(String),
}

impl ApiError {
    /// HTTP status of the failed call, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}
