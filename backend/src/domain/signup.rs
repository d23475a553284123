//! Signup use-case: account creation with uniqueness checks.
//!
//! The service looks up `email` then `username`, rejects a malformed email
//! only after both lookups, hashes the password off the async runtime, and
//! inserts the record. The lookups give callers the error
//! they expect in the common case; the store's duplicate-key signal on insert
//! is authoritative when two signups race past the lookups together.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{SignupCommand, UniqueField, UserStore, UserStoreError};
use crate::domain::{
    CredentialStore, Email, PasswordHash, UserId, UserRecord, UserSummary, UserValidationError,
    Username,
};

/// Reasons a signup is rejected.
///
/// `Display` output is the client-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    /// A field is missing or malformed.
    #[error(transparent)]
    Invalid(#[from] UserValidationError),
    /// The password was missing or empty.
    #[error("password is required")]
    MissingPassword,
    /// Another account already uses this email.
    #[error("Email already registered")]
    DuplicateEmail,
    /// Another account already uses this username.
    #[error("Username already taken")]
    DuplicateUsername,
    /// The store or the hashing step failed.
    #[error("{message}")]
    Persistence { message: String },
}

impl SignupError {
    /// Wrap an underlying failure, keeping its description.
    pub fn persistence(cause: impl fmt::Display) -> Self {
        Self::Persistence {
            message: cause.to_string(),
        }
    }
}

/// Validated signup input.
///
/// ## Invariants
/// - `email` is present (not blank); its syntax is checked by the service
///   after the uniqueness lookups.
/// - `username` is present (not blank).
/// - `password` is non-empty; surrounding whitespace is kept.
///
/// # Examples
/// ```
/// use signup_backend::domain::SignupRequest;
///
/// let request = SignupRequest::try_from_parts("u1@x.com", "u1", "secret").unwrap();
/// assert_eq!(request.username().as_ref(), "u1");
/// ```
#[derive(Clone)]
pub struct SignupRequest {
    email: String,
    username: Username,
    password: Zeroizing<String>,
}

impl SignupRequest {
    /// Check presence of the raw inputs in field order: email, username, password.
    pub fn try_from_parts(email: &str, username: &str, password: &str) -> Result<Self, SignupError> {
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail.into());
        }
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(SignupError::MissingPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Requested email address, as submitted.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Plaintext password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signup service implementing [`SignupCommand`] over a [`UserStore`].
pub struct SignupService<S: ?Sized> {
    users: Arc<S>,
    credentials: CredentialStore,
}

impl<S: ?Sized> Clone for SignupService<S> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            credentials: self.credentials.clone(),
        }
    }
}

impl<S: ?Sized> SignupService<S> {
    /// Create a service writing to `users` and hashing with `credentials`.
    pub fn new(users: Arc<S>, credentials: CredentialStore) -> Self {
        Self { users, credentials }
    }
}

impl<S> SignupService<S>
where
    S: UserStore + ?Sized,
{
    /// `email` is `None` when the address is malformed; no stored record can
    /// hold such an address, so only the username is looked up.
    async fn ensure_unique(
        &self,
        email: Option<&Email>,
        username: &Username,
    ) -> Result<(), SignupError> {
        if let Some(email) = email {
            let by_email = self
                .users
                .find_by_email(email)
                .await
                .map_err(SignupError::persistence)?;
            if by_email.is_some() {
                warn!(%email, "signup rejected: email already registered");
                return Err(SignupError::DuplicateEmail);
            }
        }

        let by_username = self
            .users
            .find_by_username(username)
            .await
            .map_err(SignupError::persistence)?;
        if by_username.is_some() {
            warn!(%username, "signup rejected: username already taken");
            return Err(SignupError::DuplicateUsername);
        }
        Ok(())
    }

    async fn hash_password(&self, password: Zeroizing<String>) -> Result<PasswordHash, SignupError> {
        let credentials = self.credentials.clone();
        tokio::task::spawn_blocking(move || credentials.hash(password.as_str()))
            .await
            .map_err(|err| SignupError::persistence(format!("password hashing task failed: {err}")))?
            .map_err(SignupError::persistence)
    }
}

fn map_insert_error(error: UserStoreError) -> SignupError {
    match error {
        UserStoreError::Duplicate {
            field: UniqueField::Email,
        } => SignupError::DuplicateEmail,
        UserStoreError::Duplicate {
            field: UniqueField::Username,
        } => SignupError::DuplicateUsername,
        other => SignupError::persistence(other),
    }
}

#[async_trait]
impl<S> SignupCommand for SignupService<S>
where
    S: UserStore + ?Sized,
{
    async fn signup(&self, request: SignupRequest) -> Result<UserSummary, SignupError> {
        let SignupRequest {
            email,
            username,
            password,
        } = request;

        let email = Email::new(email);
        self.ensure_unique(email.as_ref().ok(), &username).await?;
        let email = email.inspect_err(|error| warn!(%error, "signup rejected: invalid email"))?;

        let password_hash = self.hash_password(password).await?;
        let record = UserRecord::new(UserId::random(), email, username, password_hash);

        if let Err(error) = self.users.insert(&record).await {
            warn!(%error, "signup insert failed");
            return Err(map_insert_error(error));
        }

        info!(user_id = %record.id(), username = %record.username(), "user created");
        Ok(record.summary())
    }
}
