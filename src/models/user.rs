//! User record as exposed by a user directory.

use crate::domain::UserId;
use serde::{Deserialize, Serialize};

/// A user known to the host, with the contact properties the lookup reads.
///
/// The phone is stored exactly as the host keeps it; it is normalized per
/// lookup and never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique host identifier
    pub uid: UserId,

    /// Display name shown by the host
    #[serde(rename = "displayname", default)]
    pub display_name: String,

    /// Raw, unnormalized phone property
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Primary email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRecord {
    /// Create a record with only an identity and display name.
    pub fn new(uid: UserId, display_name: impl Into<String>) -> Self {
        Self {
            uid,
            display_name: display_name.into(),
            phone: None,
            email: None,
        }
    }

    /// Builder-style setter for the raw phone property.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Builder-style setter for the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// The stored phone, or `None` if it is absent or empty.
    pub fn stored_phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.is_empty())
    }
}
