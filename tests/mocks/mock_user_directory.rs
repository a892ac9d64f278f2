use async_trait::async_trait;
use phonefinder::domain::UserId;
use phonefinder::error::{DirectoryError, DirectoryResult};
use phonefinder::{UserDirectory, UserPage, UserRecord};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock user directory for testing.
///
/// Provides an in-memory implementation of UserDirectory that can be
/// configured with test data, made to fail at a given offset, and tracks
/// method calls for verification.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockUserDirectory {
    users: Arc<Mutex<Vec<UserRecord>>>,
    fail_at_offset: Arc<Mutex<Option<usize>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockUserDirectory {
    /// Create a new empty MockUserDirectory.
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            fail_at_offset: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a user with an optional raw phone.
    pub fn add_user(&self, uid: &str, display_name: &str, phone: Option<&str>) {
        let mut user = UserRecord::new(UserId::new(uid).unwrap(), display_name);
        user.phone = phone.map(str::to_string);
        self.users.lock().unwrap().push(user);
    }

    /// Add a fully built record.
    pub fn add_record(&self, user: UserRecord) {
        self.users.lock().unwrap().push(user);
    }

    /// Make every page request at or past `offset` fail.
    pub fn fail_from(&self, offset: usize) {
        *self.fail_at_offset.lock().unwrap() = Some(offset);
    }

    /// Snapshot of the stored users.
    pub fn users(&self) -> Vec<UserRecord> {
        self.users.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn list_users(&self, limit: usize, offset: usize) -> DirectoryResult<UserPage> {
        self.track_call("list_users");

        if let Some(fail_at) = *self.fail_at_offset.lock().unwrap() {
            if offset >= fail_at {
                return Err(DirectoryError::HttpError("Connection failed".to_string()));
            }
        }

        let users = self.users.lock().unwrap();
        let page: Vec<UserRecord> = users.iter().skip(offset).take(limit).cloned().collect();

        if offset + limit >= users.len() {
            Ok(UserPage::last(page))
        } else {
            Ok(UserPage {
                users: page,
                next_offset: Some(offset + limit),
            })
        }
    }
}
