//! HTTP client for the host's OCS provisioning API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles authentication, OCS envelope
//! unwrapping and error mapping for the user listing and user detail endpoints.

mod async_wrapper;
pub use async_wrapper::{AsyncHostClient, AsyncHostClientImpl};

use crate::domain::UserId;
use crate::error::{DirectoryError, DirectoryResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::UserRecord;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// OCS status codes that mean success (v1 and v2 APIs).
const OCS_OK: [u16; 2] = [100, 200];

/// OCS status code for "not found" on the provisioning API.
const OCS_NOT_FOUND: [u16; 2] = [404, 998];

/// OCS status code for "unauthorised" on the provisioning API.
const OCS_UNAUTHORIZED: [u16; 2] = [401, 997];

/// Every OCS response wraps its payload in `{ "ocs": { "meta", "data" } }`.
///
/// `data` is kept untyped until `meta` has been checked: failures carry an
/// empty array there.
#[derive(Debug, Deserialize)]
struct OcsEnvelope {
    ocs: OcsBody,
}

#[derive(Debug, Deserialize)]
struct OcsBody {
    meta: OcsMeta,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct OcsMeta {
    statuscode: u16,
    #[serde(default)]
    message: Option<String>,
}

/// Payload of `GET /cloud/users`.
#[derive(Debug, Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<String>,
}

/// Payload of `GET /cloud/users/{uid}`; only the fields the lookup reads.
#[derive(Debug, Deserialize)]
struct HostUser {
    id: String,
    #[serde(default, alias = "display-name")]
    displayname: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl HostUser {
    fn into_record(self) -> DirectoryResult<UserRecord> {
        let uid = UserId::new(self.id)
            .map_err(|e| DirectoryError::InvalidRecord(e.to_string()))?;

        let non_empty = |value: Option<String>| value.filter(|v| !v.is_empty());

        Ok(UserRecord {
            display_name: self.displayname.unwrap_or_else(|| uid.as_str().to_string()),
            uid,
            phone: non_empty(self.phone),
            email: non_empty(self.email),
        })
    }
}

/// HTTP client for the host provisioning API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct HostClient {
    /// Base URL of the host, e.g. `https://cloud.example.com`
    base_url: String,

    /// Precomputed `Authorization` header value
    authorization: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl HostClient {
    /// Create a new HostClient.
    pub fn new(
        base_url: impl Into<String>,
        user: &str,
        password: &str,
        timeout_secs: u64,
        metrics: Metrics,
    ) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();

        Self {
            base_url: base_url.into(),
            authorization: basic_auth(user, password),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a HostClient with default timeout and fresh metrics (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, user: &str, password: &str) -> Self {
        Self::new(base_url, user, password, 10, Metrics::new())
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute an authenticated OCS GET request.
    fn get(&self, path: &str) -> DirectoryResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("Authorization", &self.authorization)
            .set("OCS-APIRequest", "true")
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(_) => timer.complete(),
            Err(e) => {
                tracing::warn!("GET {} - Error: {}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Map a ureq error to a DirectoryError.
    fn map_error(&self, error: ureq::Error) -> DirectoryError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => DirectoryError::Unauthorized,
                    404 => DirectoryError::NotFound(message),
                    _ => DirectoryError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    DirectoryError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    DirectoryError::Timeout
                } else {
                    DirectoryError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// GET an OCS endpoint and unwrap its `data` payload.
    ///
    /// OCS v1 reports failures with HTTP 200 and a non-100 `statuscode`, so
    /// the envelope status is checked as well as the HTTP status.
    fn get_ocs<T: DeserializeOwned>(&self, path: &str) -> DirectoryResult<T> {
        let response = self.get(path)?;
        let body = response
            .into_string()
            .map_err(|e| DirectoryError::HttpError(e.to_string()))?;

        let envelope: OcsEnvelope = serde_json::from_str(&body)?;
        let meta = envelope.ocs.meta;
        let message = meta.message.unwrap_or_default();

        if OCS_UNAUTHORIZED.contains(&meta.statuscode) {
            return Err(DirectoryError::Unauthorized);
        }
        if OCS_NOT_FOUND.contains(&meta.statuscode) {
            return Err(DirectoryError::NotFound(message));
        }
        if !OCS_OK.contains(&meta.statuscode) {
            return Err(DirectoryError::ApiError {
                status: meta.statuscode,
                message,
            });
        }

        if envelope.ocs.data.is_null() {
            return Err(DirectoryError::InvalidRecord(
                "OCS response without data".to_string(),
            ));
        }

        // Payload decode failures are per-record.
        serde_json::from_value(envelope.ocs.data)
            .map_err(|e| DirectoryError::InvalidRecord(e.to_string()))
    }

    /// List user IDs, one page at a time, in the host's stable order.
    pub fn list_user_ids(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<String>> {
        let path = format!(
            "/ocs/v1.php/cloud/users?limit={}&offset={}&format=json",
            limit, offset
        );
        let list: UserList = self.get_ocs(&path)?;
        Ok(list.users)
    }

    /// Fetch the account properties of a single user.
    pub fn get_user(&self, uid: &str) -> DirectoryResult<UserRecord> {
        let path = format!(
            "/ocs/v1.php/cloud/users/{}?format=json",
            urlencoding::encode(uid)
        );
        let user: HostUser = self.get_ocs(&path)?;
        user.into_record()
    }
}

fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, password)))
}
