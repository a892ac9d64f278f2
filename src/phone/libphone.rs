use crate::config::Config;
use crate::domain::{CanonicalPhoneNumber, RegionCode};
use crate::error::NormalizationError;
use crate::phone::PhoneNormalizer;
use phonenumber::{country, Mode};

/// Normalizer backed by the libphonenumber metadata shipped in `phonenumber`.
///
/// When a caller passes no region hint, the configured default region (if
/// any) is used instead, the same way the host applies its default phone
/// region to stored numbers. Without either, only numbers written in
/// international `+` form parse. Input in `+` form never consults a region,
/// so the hint neither changes its canonical form nor has to be valid.
#[derive(Debug, Clone, Default)]
pub struct LibPhoneNormalizer {
    default_region: Option<RegionCode>,
    strict: bool,
}

impl LibPhoneNormalizer {
    /// Normalizer with no default region and lenient validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the region used when the caller gives no hint.
    ///
    /// # Errors
    ///
    /// Returns `NormalizationError::UnknownRegion` if the phone metadata has
    /// no such region.
    pub fn with_default_region(mut self, region: &str) -> Result<Self, NormalizationError> {
        let region = RegionCode::new(region)
            .map_err(|_| NormalizationError::UnknownRegion(region.to_string()))?;
        resolve_region(&region)?;
        self.default_region = Some(region);
        Ok(self)
    }

    /// In strict mode, numbers that parse but are not valid assigned numbers
    /// are rejected.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build the normalizer described by the service configuration.
    pub fn from_config(config: &Config) -> Result<Self, NormalizationError> {
        let normalizer = Self::new().strict(config.strict_validation);
        match config.default_region.as_deref() {
            Some(region) => normalizer.with_default_region(region),
            None => Ok(normalizer),
        }
    }

    pub fn default_region(&self) -> Option<&RegionCode> {
        self.default_region.as_ref()
    }

    fn effective_region(&self, hint: Option<&str>) -> Result<Option<country::Id>, NormalizationError> {
        match hint.map(str::trim).filter(|h| !h.is_empty()) {
            Some(code) => {
                let region = RegionCode::new(code)
                    .map_err(|_| NormalizationError::UnknownRegion(code.to_string()))?;
                resolve_region(&region).map(Some)
            }
            None => self.default_region.as_ref().map(resolve_region).transpose(),
        }
    }
}

fn resolve_region(region: &RegionCode) -> Result<country::Id, NormalizationError> {
    region
        .as_str()
        .parse::<country::Id>()
        .map_err(|_| NormalizationError::UnknownRegion(region.to_string()))
}

/// Whether `raw` is written with an international `+` prefix.
fn is_international(raw: &str) -> bool {
    raw.trim_start().starts_with(['+', '\u{FF0B}'])
}

impl PhoneNormalizer for LibPhoneNormalizer {
    fn normalize(
        &self,
        raw: &str,
        region: Option<&str>,
    ) -> Result<CanonicalPhoneNumber, NormalizationError> {
        // A leading plus carries its own country code; regional national
        // prefix rules must not be applied to it.
        let country = if is_international(raw) {
            None
        } else {
            self.effective_region(region)?
        };

        let number = phonenumber::parse(country, raw).map_err(|e| {
            NormalizationError::Unparseable {
                reason: e.to_string(),
            }
        })?;

        if self.strict && !phonenumber::is_valid(&number) {
            return Err(NormalizationError::NotValid);
        }

        let formatted = number.format().mode(Mode::E164).to_string();
        CanonicalPhoneNumber::new(formatted).map_err(|e| NormalizationError::Unparseable {
            reason: e.to_string(),
        })
    }
}
