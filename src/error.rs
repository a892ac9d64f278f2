//! Error types for the phone lookup service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Message returned when the `number` query parameter is empty.
pub const MISSING_NUMBER: &str = "Missing number";

/// Message returned when the query number cannot be normalized.
pub const INVALID_NUMBER: &str = "Invalid phone number";

/// Errors surfaced by the phone lookup handler.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// The caller sent a query that cannot be answered
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The user directory could not be enumerated
    #[error("User directory unavailable: {0}")]
    Directory(#[from] DirectoryError),
}

impl HandlerError {
    /// Shorthand for `BadRequest(MISSING_NUMBER)`.
    pub fn missing_number() -> Self {
        Self::BadRequest(MISSING_NUMBER.to_string())
    }

    /// Shorthand for `BadRequest(INVALID_NUMBER)`.
    pub fn invalid_number() -> Self {
        Self::BadRequest(INVALID_NUMBER.to_string())
    }
}

/// Errors that can occur while turning raw input into a canonical phone number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// Region hint is not a known ISO 3166-1 alpha-2 code
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// Input could not be parsed as a phone number
    #[error("Unparseable phone number: {reason}")]
    Unparseable { reason: String },

    /// Input parsed but is not a valid assigned number
    #[error("Phone number is not valid for its region")]
    NotValid,
}

/// Errors that can occur when reading the user directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Host returned an error status code
    #[error("Host error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Host rejected our credentials
    #[error("Authentication failed")]
    Unauthorized,

    /// User disappeared between listing and fetching
    #[error("User not found: {0}")]
    NotFound(String),

    /// Failed to read a local user file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record from the backing store is unusable
    #[error("Invalid user record: {0}")]
    InvalidRecord(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Failed to load .env file
    #[error("Failed to load .env file: {0}")]
    DotenvError(String),
}

/// Convenience type alias for Results with HandlerError
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Convenience type alias for Results with DirectoryError
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
