use crate::client::AsyncHostClient;
use crate::directory::{UserDirectory, UserPage};
use crate::error::{DirectoryError, DirectoryResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Directory backed by the host's provisioning API.
///
/// Each page lists user ids and then fetches every user's properties.
pub struct HostUserDirectory {
    client: Arc<dyn AsyncHostClient>,
}

impl HostUserDirectory {
    pub fn new(client: Arc<dyn AsyncHostClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserDirectory for HostUserDirectory {
    async fn list_users(&self, limit: usize, offset: usize) -> DirectoryResult<UserPage> {
        let ids = self.client.list_user_ids(limit, offset).await?;
        let next_offset = (ids.len() >= limit && !ids.is_empty()).then(|| offset + ids.len());

        let mut users = Vec::with_capacity(ids.len());
        for uid in &ids {
            match self.client.get_user(uid).await {
                Ok(user) => users.push(user),
                // Deleted between listing and fetching.
                Err(DirectoryError::NotFound(_)) => {
                    tracing::debug!(uid = %uid, "User vanished during scan");
                }
                Err(DirectoryError::InvalidRecord(reason)) => {
                    tracing::debug!(uid = %uid, reason = %reason, "Skipping malformed user record");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(UserPage { users, next_offset })
    }
}
