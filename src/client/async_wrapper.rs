//! Async wrapper around synchronous HostClient.
//!
//! This module provides an async interface to the synchronous HostClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::HostClient;
use crate::error::{DirectoryError, DirectoryResult};
use crate::models::UserRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for host client operations.
#[async_trait]
pub trait AsyncHostClient: Send + Sync {
    async fn list_user_ids(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<String>>;
    async fn get_user(&self, uid: &str) -> DirectoryResult<UserRecord>;
}

/// Async wrapper around synchronous HostClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncHostClientImpl {
    client: Arc<HostClient>,
}

impl AsyncHostClientImpl {
    pub fn new(client: HostClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncHostClient for AsyncHostClientImpl {
    async fn list_user_ids(&self, limit: usize, offset: usize) -> DirectoryResult<Vec<String>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_user_ids(limit, offset))
            .await
            .map_err(|e| DirectoryError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn get_user(&self, uid: &str) -> DirectoryResult<UserRecord> {
        let client = self.client.clone();
        let uid = uid.to_string();

        tokio::task::spawn_blocking(move || client.get_user(&uid))
            .await
            .map_err(|e| DirectoryError::HttpError(format!("Task join error: {}", e)))?
    }
}
