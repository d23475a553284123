//! In-memory `UserStore` adapter.
//!
//! Used when no database URL is configured and by HTTP tests. A single mutex
//! guards both unique indexes, so the duplicate check and the write in
//! [`UserStore::insert`] are atomic.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UniqueField, UserStore, UserStoreError};
use crate::domain::{Email, UserId, UserRecord, Username};

#[derive(Default)]
struct Records {
    by_id: HashMap<UserId, UserRecord>,
    email_index: HashMap<String, UserId>,
    username_index: HashMap<String, UserId>,
}

impl Records {
    fn lookup(&self, index: &HashMap<String, UserId>, key: &str) -> Option<UserRecord> {
        index.get(key).and_then(|id| self.by_id.get(id)).cloned()
    }
}

/// Process-local user store with unique email and username indexes.
///
/// # Examples
/// ```
/// use signup_backend::outbound::memory::InMemoryUserStore;
///
/// let store = InMemoryUserStore::new();
/// assert!(store.is_empty()?);
/// # Ok::<(), signup_backend::domain::ports::UserStoreError>(())
/// ```
#[derive(Default)]
pub struct InMemoryUserStore {
    records: Mutex<Records>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, UserStoreError> {
        self.records
            .lock()
            .map_err(|_| UserStoreError::query("in-memory user store lock poisoned"))
    }

    /// Number of stored records.
    ///
    /// # Errors
    /// Returns [`UserStoreError::Query`] when a writer panicked while holding
    /// the lock.
    pub fn len(&self) -> Result<usize, UserStoreError> {
        self.lock().map(|records| records.by_id.len())
    }

    /// Whether the store holds no records.
    ///
    /// # Errors
    /// Fails like [`InMemoryUserStore::len`].
    pub fn is_empty(&self) -> Result<bool, UserStoreError> {
        self.len().map(|count| count == 0)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, UserStoreError> {
        let records = self.lock()?;
        Ok(records.lookup(&records.email_index, email.as_ref()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let records = self.lock()?;
        Ok(records.lookup(&records.username_index, username.as_ref()))
    }

    async fn insert(&self, record: &UserRecord) -> Result<(), UserStoreError> {
        let mut records = self.lock()?;
        let email = record.email().as_ref();
        let username = record.username().as_ref();
        if records.email_index.contains_key(email) {
            return Err(UserStoreError::duplicate(UniqueField::Email));
        }
        if records.username_index.contains_key(username) {
            return Err(UserStoreError::duplicate(UniqueField::Username));
        }

        let id = *record.id();
        records.email_index.insert(email.to_owned(), id);
        records.username_index.insert(username.to_owned(), id);
        records.by_id.insert(id, record.clone());
        Ok(())
    }

    async fn probe(&self) -> Result<(), UserStoreError> {
        self.lock().map(|_| ())
    }
}
