//! User record model.
//!
//! A [`UserRecord`] is the persisted account created at signup. Its
//! components are validated newtypes so adapters cannot store a record with
//! a blank username, a malformed email, or a plaintext password.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the user record constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Email was missing or blank.
    EmptyEmail,
    /// Email does not look like an address.
    InvalidEmail { value: String },
    /// Username was missing or blank.
    EmptyUsername,
    /// Password hash was empty.
    EmptyPasswordHash,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email is required"),
            Self::InvalidEmail { value } => write!(f, "Invalid email address: {value}"),
            Self::EmptyUsername => write!(f, "username is required"),
            Self::EmptyPasswordHash => write!(f, "password hash must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable identifier assigned to a record when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, a non-empty local part, and a dotted domain without spaces.
        let pattern = r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address.
///
/// # Examples
/// ```
/// use signup_backend::domain::Email;
///
/// let email = Email::new("ada@example.com").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// assert!(Email::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, UserValidationError> {
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail { value: email });
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Account handle chosen at signup.
///
/// Only presence is enforced; the value is stored exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(username.into())
    }

    fn from_owned(username: String) -> Result<Self, UserValidationError> {
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Salted password digest in PHC string format.
///
/// `Debug` output is redacted so digests never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap a digest produced by the credential store or read from storage.
    pub fn new(digest: impl Into<String>) -> Result<Self, UserValidationError> {
        let digest = digest.into();
        if digest.is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(digest))
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Persisted account.
///
/// ## Invariants
/// - `email` is a syntactically valid address.
/// - `username` is non-blank.
/// - `password_hash` is never the plaintext password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    email: Email,
    username: Username,
    password_hash: PasswordHash,
}

impl UserRecord {
    /// Build a record from validated components.
    pub fn new(id: UserId, email: Email, username: Username, password_hash: PasswordHash) -> Self {
        Self {
            id,
            email,
            username,
            password_hash,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Registered email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Registered username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password digest.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Public projection returned to clients.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            email: self.email.to_string(),
            username: self.username.to_string(),
        }
    }
}

/// Client-visible view of a [`UserRecord`]; carries no credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    /// Registered email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Registered username.
    #[schema(example = "ada")]
    pub username: String,
}

#[cfg(test)]
mod tests;
