//! User directories: the sources of user records a lookup scans.

mod host;
mod in_memory;

pub use host::HostUserDirectory;
pub use in_memory::InMemoryUserDirectory;

use crate::client::{AsyncHostClientImpl, HostClient};
use crate::config::{Config, DirectorySource};
use crate::error::DirectoryResult;
use crate::metrics::Metrics;
use crate::models::UserRecord;
use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use std::sync::Arc;

/// One page of users plus where the next page starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPage {
    pub users: Vec<UserRecord>,

    /// Offset of the next page, or `None` when the directory is exhausted
    pub next_offset: Option<usize>,
}

impl UserPage {
    /// The last page of a directory.
    pub fn last(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            next_offset: None,
        }
    }
}

/// Read-only access to every user known to the host.
///
/// Implementations must page in a stable order so that a full scan visits
/// each user exactly once.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Retrieve up to `limit` users starting at `offset`.
    async fn list_users(&self, limit: usize, offset: usize) -> DirectoryResult<UserPage>;
}

type PageItems = stream::Iter<std::vec::IntoIter<DirectoryResult<UserRecord>>>;

async fn next_page(
    directory: &dyn UserDirectory,
    page_size: usize,
    offset: Option<usize>,
) -> DirectoryResult<Option<(PageItems, Option<usize>)>> {
    let Some(offset) = offset else {
        return Ok(None);
    };

    let page = directory.list_users(page_size, offset).await?;
    let items: Vec<DirectoryResult<UserRecord>> = page.users.into_iter().map(Ok).collect();

    Ok(Some((stream::iter(items), page.next_offset)))
}

/// Lazily enumerate every user in `directory`, one page at a time.
///
/// A page is requested only once the previous one has been consumed; the
/// stream ends after the first page that reports no successor, and yields
/// the directory's error if a page cannot be read.
pub fn scan_users(
    directory: &dyn UserDirectory,
    page_size: usize,
) -> BoxStream<'_, DirectoryResult<UserRecord>> {
    let page_size = page_size.max(1);

    stream::try_unfold(Some(0usize), move |offset| {
        next_page(directory, page_size, offset)
    })
    .try_flatten()
    .boxed()
}

/// Build the directory selected by the configuration.
pub fn from_config(config: &Config, metrics: Metrics) -> DirectoryResult<Arc<dyn UserDirectory>> {
    match &config.directory {
        DirectorySource::File(path) => {
            let directory = InMemoryUserDirectory::from_json_file(path)?;
            tracing::info!(
                "Loaded {} users from {}",
                directory.len(),
                path.display()
            );
            Ok(Arc::new(directory))
        }
        DirectorySource::Host {
            url,
            user,
            password,
        } => {
            let client = HostClient::new(
                url.as_str(),
                user,
                password,
                config.request_timeout,
                metrics,
            );
            tracing::info!("Reading users from host at {}", url);
            Ok(Arc::new(HostUserDirectory::new(Arc::new(
                AsyncHostClientImpl::new(client),
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn users(n: usize) -> Vec<UserRecord> {
        (0..n)
            .map(|i| UserRecord::new(UserId::new(format!("u{}", i)).unwrap(), format!("User {}", i)))
            .collect()
    }

    /// Directory that counts page requests.
    struct CountingDirectory {
        inner: InMemoryUserDirectory,
        pages: AtomicUsize,
    }

    #[async_trait]
    impl UserDirectory for CountingDirectory {
        async fn list_users(&self, limit: usize, offset: usize) -> DirectoryResult<UserPage> {
            self.pages.fetch_add(1, Ordering::SeqCst);
            self.inner.list_users(limit, offset).await
        }
    }

    #[tokio::test]
    async fn test_scan_visits_every_user_in_order() {
        let directory = InMemoryUserDirectory::new(users(7)).unwrap();

        let scanned: Vec<UserRecord> = scan_users(&directory, 3).try_collect().await.unwrap();

        let ids: Vec<&str> = scanned.iter().map(|u| u.uid.as_str()).collect();
        assert_eq!(ids, vec!["u0", "u1", "u2", "u3", "u4", "u5", "u6"]);
    }

    #[tokio::test]
    async fn test_scan_requests_pages_lazily() {
        let directory = CountingDirectory {
            inner: InMemoryUserDirectory::new(users(10)).unwrap(),
            pages: AtomicUsize::new(0),
        };

        let first_two: Vec<_> = scan_users(&directory, 4).take(2).collect().await;

        assert_eq!(first_two.len(), 2);
        assert_eq!(directory.pages.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_scan_with_zero_page_size_still_progresses() {
        let directory = InMemoryUserDirectory::new(users(3)).unwrap();

        let scanned: Vec<UserRecord> = scan_users(&directory, 0).try_collect().await.unwrap();

        assert_eq!(scanned.len(), 3);
    }

    #[tokio::test]
    async fn test_scan_of_empty_directory() {
        let directory = InMemoryUserDirectory::new(Vec::new()).unwrap();

        let scanned: Vec<UserRecord> = scan_users(&directory, 10).try_collect().await.unwrap();

        assert!(scanned.is_empty());
    }
}
