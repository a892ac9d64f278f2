//! Phone number normalization.
//!
//! The lookup compares numbers only in canonical (E.164) form. This module
//! defines the seam the lookup depends on and the libphonenumber-backed
//! implementation the server uses.

mod libphone;

pub use libphone::LibPhoneNormalizer;

use crate::domain::CanonicalPhoneNumber;
use crate::error::NormalizationError;

/// Converts free-form phone input into a canonical number.
///
/// Implementations must be deterministic: two representations of the same
/// line must normalize to equal values.
pub trait PhoneNormalizer: Send + Sync {
    /// Normalize `raw`, using `region` to interpret numbers written without
    /// an international prefix.
    fn normalize(
        &self,
        raw: &str,
        region: Option<&str>,
    ) -> Result<CanonicalPhoneNumber, NormalizationError>;
}
