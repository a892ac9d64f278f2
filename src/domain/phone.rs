//! CanonicalPhoneNumber value object.

use super::errors::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;

/// A phone number in E.164 form, e.g. `+15551234567`.
///
/// Two canonical numbers denote the same line iff their strings are equal,
/// so equality is plain string equality. Values are only produced by a
/// normalizer, which is why there is no `Deserialize` impl.
///
/// # Example
///
/// ```
/// use phonefinder::domain::CanonicalPhoneNumber;
///
/// let phone = CanonicalPhoneNumber::new("+15551234567").unwrap();
/// assert_eq!(phone.as_str(), "+15551234567");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPhoneNumber(String);

impl CanonicalPhoneNumber {
    /// Shortest number (country code + subscriber number) E.164 allows in practice.
    const MIN_DIGITS: usize = 2;

    /// Longest number E.164 allows.
    const MAX_DIGITS: usize = 15;

    /// Wrap an already formatted E.164 string.
    ///
    /// # Validation Rules
    ///
    /// - Must start with '+'
    /// - Followed by 2 to 15 ASCII digits
    /// - First digit (the country code) must not be '0'
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NotE164` if the string is not in E.164 form.
    pub fn new(e164: impl Into<String>) -> Result<Self, ValidationError> {
        let e164 = e164.into();

        if !Self::is_e164(&e164) {
            return Err(ValidationError::NotE164(e164));
        }

        Ok(Self(e164))
    }

    fn is_e164(value: &str) -> bool {
        let Some(digits) = value.strip_prefix('+') else {
            return false;
        };

        (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len())
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0')
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Serialize for CanonicalPhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for CanonicalPhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_valid() {
        let phone = CanonicalPhoneNumber::new("+15551234567").unwrap();
        assert_eq!(phone.as_str(), "+15551234567");
    }

    #[test]
    fn test_canonical_rejects_non_e164() {
        assert!(CanonicalPhoneNumber::new("").is_err());
        assert!(CanonicalPhoneNumber::new("+").is_err());
        assert!(CanonicalPhoneNumber::new("15551234567").is_err());
        assert!(CanonicalPhoneNumber::new("+1 555 123 4567").is_err());
        assert!(CanonicalPhoneNumber::new("+05551234567").is_err());
        assert!(CanonicalPhoneNumber::new("+1234567890123456").is_err());
        assert!(CanonicalPhoneNumber::new("+442079460958").is_ok());
    }

    #[test]
    fn test_canonical_serializes_as_string() {
        let phone = CanonicalPhoneNumber::new("+442079460958").unwrap();
        assert_eq!(serde_json::to_string(&phone).unwrap(), "\"+442079460958\"");
        assert_eq!(format!("{}", phone), "+442079460958");
    }
}
