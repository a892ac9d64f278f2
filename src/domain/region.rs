//! RegionCode value object.

use super::errors::ValidationError;
use std::fmt;
use std::str::FromStr;

/// An ISO 3166-1 alpha-2 region hint, stored upper-cased.
///
/// Only the shape is checked here; whether the phone metadata knows the
/// region is the normalizer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionCode(String);

impl RegionCode {
    /// Parse a region hint, trimming whitespace and upper-casing it.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidRegion` unless the trimmed input is
    /// exactly two ASCII letters.
    pub fn new(code: &str) -> Result<Self, ValidationError> {
        let trimmed = code.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidRegion(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RegionCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
