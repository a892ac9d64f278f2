use crate::directory::{UserDirectory, UserPage};
use crate::error::{DirectoryError, DirectoryResult};
use crate::models::UserRecord;
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::Path;

/// Directory held entirely in memory, paged in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Vec<UserRecord>,
}

impl InMemoryUserDirectory {
    /// Create a directory from a list of users.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::InvalidRecord` if two users share a uid.
    pub fn new(users: Vec<UserRecord>) -> DirectoryResult<Self> {
        let mut seen = HashSet::with_capacity(users.len());
        for user in &users {
            if !seen.insert(user.uid.as_str()) {
                return Err(DirectoryError::InvalidRecord(format!(
                    "duplicate uid '{}'",
                    user.uid
                )));
            }
        }

        Ok(Self { users })
    }

    /// Load a JSON array of user records, e.g. a host user export.
    pub fn from_json_file(path: impl AsRef<Path>) -> DirectoryResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let users: Vec<UserRecord> = serde_json::from_str(&content)?;
        Self::new(users)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn list_users(&self, limit: usize, offset: usize) -> DirectoryResult<UserPage> {
        let users: Vec<UserRecord> = self
            .users
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        let end = offset.saturating_add(limit);
        let next_offset = (end < self.users.len()).then_some(end);

        Ok(UserPage { users, next_offset })
    }
}
