//! Domain types, use-cases, and ports.
//!
//! Purpose: keep signup rules independent of HTTP and storage. Inbound
//! adapters call [`ports::SignupCommand`]; outbound adapters implement
//! [`ports::UserStore`].
//!
//! Public surface:
//! - UserRecord / UserSummary — persisted account and its client view.
//! - Email / Username / PasswordHash — validated record components.
//! - CredentialStore — salted password hashing and verification.
//! - SignupService / SignupRequest / SignupError — the signup use-case.
//! - TraceId — request correlation identifier.

pub mod credentials;
pub mod ports;
pub mod signup;
pub mod trace_id;
pub mod user;

pub use self::credentials::{CredentialError, CredentialStore};
pub use self::signup::{SignupError, SignupRequest, SignupService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, PasswordHash, UserId, UserRecord, UserSummary, UserValidationError, Username,
};
