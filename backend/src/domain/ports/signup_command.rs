//! Driving port for the signup use-case.
//!
//! HTTP handlers call this port without knowing which store or hashing
//! configuration sits behind it, so handler tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{SignupError, SignupRequest, UserSummary};

/// Domain use-case port for account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupCommand: Send + Sync {
    /// Create an account, returning its public summary.
    async fn signup(&self, request: SignupRequest) -> Result<UserSummary, SignupError>;
}
