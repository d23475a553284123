//! Driven port for the user record store.
//!
//! The store owns every persisted [`UserRecord`]. Adapters must enforce
//! uniqueness of `email` and `username` themselves and report a violation as
//! [`UserStoreError::Duplicate`]; callers treat that signal as authoritative
//! even when an earlier lookup found no conflict.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Email, UserRecord, Username};

use super::define_port_error;

/// Unique field named by a duplicate-key failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueField {
    /// The `email` column/index.
    Email,
    /// The `username` column/index.
    Username,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Username => f.write_str("username"),
        }
    }
}

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// Store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// Lookup or write failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// Insert violated a uniqueness constraint.
        Duplicate { field: UniqueField } => "user store rejected duplicate {field}",
    }
}

/// Find-one-by-field and insert operations over user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the record registered with `email`, if any.
    async fn find_by_email(&self, email: &Email) -> Result<Option<UserRecord>, UserStoreError>;

    /// Fetch the record registered with `username`, if any.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserRecord>, UserStoreError>;

    /// Persist a new record.
    ///
    /// Returns [`UserStoreError::Duplicate`] when either unique field is
    /// already taken; in that case nothing is written.
    async fn insert(&self, record: &UserRecord) -> Result<(), UserStoreError>;

    /// Touch the store to confirm it is reachable.
    async fn probe(&self) -> Result<(), UserStoreError>;
}
