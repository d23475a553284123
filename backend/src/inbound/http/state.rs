//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{SignupCommand, UserStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account creation use-case.
    pub signup: Arc<dyn SignupCommand>,
    /// Store handle used by the connectivity probe.
    pub users: Arc<dyn UserStore>,
}

impl HttpState {
    /// Bundle the signup use-case with the store it writes to.
    pub fn new(signup: Arc<dyn SignupCommand>, users: Arc<dyn UserStore>) -> Self {
        Self { signup, users }
    }
}
