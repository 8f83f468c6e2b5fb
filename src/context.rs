//! In-memory user context store
//!
//! Holds one [`UserRecord`] per user identifier for the lifetime of the
//! process. Records are created lazily on first access and never removed.
//! The map sits behind a read-write lock and every record behind its own
//! mutex, so concurrent merges against the same user are applied one at a
//! time instead of racing.

use crate::models::{Profile, ProfileUpdate, UserRecord};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::debug;

/// Shared handle to a single user's record
pub type SharedRecord = Arc<Mutex<UserRecord>>;

#[derive(Default)]
pub struct UserContextStore {
    users: RwLock<HashMap<String, SharedRecord>>,
}

// A panic while holding a record lock leaves plain data behind; keep serving it.
fn lock(record: &SharedRecord) -> MutexGuard<'_, UserRecord> {
    record.lock().unwrap_or_else(PoisonError::into_inner)
}

impl UserContextStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the record for `user_id`, creating an empty one if absent
    pub fn get(&self, user_id: &str) -> SharedRecord {
        {
            let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(record) = users.get(user_id) {
                return Arc::clone(record);
            }
        }

        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(users.entry(user_id.to_string()).or_insert_with(|| {
            debug!(user_id, "Creating user context record");
            Arc::new(Mutex::new(UserRecord::default()))
        }))
    }

    /// Merge the supplied keys into the profile
    pub fn update_profile(&self, user_id: &str, updates: ProfileUpdate) {
        let record = self.get(user_id);
        lock(&record).profile.merge(updates);
    }

    pub fn get_profile(&self, user_id: &str) -> Profile {
        let record = self.get(user_id);
        lock(&record).profile.clone()
    }

    /// Merge the supplied keys into the preferences
    pub fn update_preferences(&self, user_id: &str, updates: BTreeMap<String, Value>) {
        let record = self.get(user_id);
        lock(&record).preferences.extend(updates);
    }

    pub fn add_history(&self, user_id: &str, query: impl Into<String>) {
        let record = self.get(user_id);
        lock(&record).history.push(query.into());
    }

    pub fn add_feedback(&self, user_id: &str, feedback: impl Into<String>) {
        let record = self.get(user_id);
        lock(&record).feedback.push(feedback.into());
    }

    /// Copy of an existing record; never creates one
    pub fn snapshot(&self, user_id: &str) -> Option<UserRecord> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        users.get(user_id).map(|record| lock(record).clone())
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
