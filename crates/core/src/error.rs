//! Error types for s3b-core
//!
//! Provides a unified error type that can be converted to HTTP status codes.

use thiserror::Error;

/// Result type alias for s3b-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3b-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or incomplete request from the browser
    #[error("{0}")]
    InvalidRequest(String),

    /// No session, or the session is unknown
    #[error("{0}")]
    Unauthorized(String),

    /// The backend refused the operation
    #[error("{0}")]
    AccessDenied(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Conflict error
    #[error("{0}")]
    Conflict(String),

    /// Network or backend error
    #[error("{0}")]
    Network(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the HTTP status code this error should be reported with
    pub const fn status_code(&self) -> u16 {
        match self {
            Error::InvalidRequest(_) | Error::InvalidUrl(_) | Error::Json(_) => 400,
            Error::Unauthorized(_) => 401,
            Error::AccessDenied(_) => 403,
            Error::NotFound(_) => 404,
            Error::Conflict(_) => 409,
            _ => 500,
        }
    }
}
