//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided user ID is empty.
    EmptyId,

    /// The provided string is not in E.164 form.
    NotE164(String),

    /// The provided region code is not two ASCII letters.
    InvalidRegion(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "User ID cannot be empty"),
            Self::NotE164(value) => write!(f, "Not an E.164 phone number: {}", value),
            Self::InvalidRegion(value) => write!(f, "Invalid region code: {}", value),
        }
    }
}

impl std::error::Error for ValidationError {}
