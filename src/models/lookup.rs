//! Request and response shapes of the phone lookup.

use crate::domain::{CanonicalPhoneNumber, UserId};
use crate::models::UserRecord;
use serde::{Deserialize, Serialize};

/// Query parameters of a lookup request.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LookupQuery {
    /// Free-form phone number to look for
    #[serde(default)]
    pub number: String,

    /// Optional region hint used to parse `number`
    #[serde(default)]
    pub region: Option<String>,
}

impl LookupQuery {
    pub fn new(number: impl Into<String>, region: Option<&str>) -> Self {
        Self {
            number: number.into(),
            region: region.map(str::to_string),
        }
    }

    /// Region hint with empty strings treated as absent.
    pub fn region_hint(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// One user whose stored phone matched the query.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MatchResult {
    pub uid: UserId,

    #[serde(rename = "displayname")]
    pub display_name: String,

    /// Canonical form of the user's stored phone
    pub phone: CanonicalPhoneNumber,

    /// Serialized as `null` when the user has no email
    pub email: Option<String>,
}

impl MatchResult {
    /// Build a match from the user it was found on and its canonical phone.
    pub fn from_user(user: &UserRecord, phone: CanonicalPhoneNumber) -> Self {
        Self {
            uid: user.uid.clone(),
            display_name: user.display_name.clone(),
            phone,
            email: user.email.clone(),
        }
    }
}

/// Lookup result: matches in directory order plus their count.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct LookupResponse {
    pub matches: Vec<MatchResult>,
    pub count: usize,
}

impl From<Vec<MatchResult>> for LookupResponse {
    fn from(matches: Vec<MatchResult>) -> Self {
        let count = matches.len();
        Self { matches, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_when_params_missing() {
        let query: LookupQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.number, "");
        assert_eq!(query.region, None);
    }

    #[test]
    fn test_empty_region_is_no_hint() {
        assert_eq!(LookupQuery::new("123", Some("")).region_hint(), None);
        assert_eq!(LookupQuery::new("123", Some("  ")).region_hint(), None);
        assert_eq!(LookupQuery::new("123", Some("US")).region_hint(), Some("US"));
    }

    #[test]
    fn test_response_wire_format() {
        let user = UserRecord::new(UserId::new("u1").unwrap(), "User One");
        let phone = CanonicalPhoneNumber::new("+15551234567").unwrap();
        let response = LookupResponse::from(vec![MatchResult::from_user(&user, phone)]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "matches": [{
                    "uid": "u1",
                    "displayname": "User One",
                    "phone": "+15551234567",
                    "email": null
                }],
                "count": 1
            })
        );
    }
}
