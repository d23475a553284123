//! Credential store: salted password hashing and verification.
//!
//! Digests are Argon2id PHC strings, so the salt and cost parameters travel
//! with the digest. Equality of two digests says nothing about the passwords
//! behind them; always go through [`CredentialStore::verify`].

use std::fmt;
use std::sync::Arc;

use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;
use zeroize::Zeroizing;

use super::PasswordHash;

/// Errors raised while producing a digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Cost parameters or the server secret were rejected by Argon2.
    #[error("invalid password hashing configuration: {message}")]
    Configuration { message: String },
    /// The hashing primitive failed.
    #[error("password hashing failed: {message}")]
    Hashing { message: String },
}

impl CredentialError {
    fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }
}

/// Password hashing utility shared by request handlers.
///
/// An optional server secret is mixed into every digest as an Argon2 keyed
/// secret. Digests produced with a secret only verify with the same secret.
///
/// # Examples
/// ```
/// use signup_backend::domain::CredentialStore;
///
/// let store = CredentialStore::with_cost(8, 1).expect("valid cost");
/// let digest = store.hash("correct horse").expect("hash");
/// assert!(store.verify("correct horse", &digest));
/// assert!(!store.verify("battery staple", &digest));
/// ```
#[derive(Clone)]
pub struct CredentialStore {
    secret: Option<Arc<Zeroizing<Vec<u8>>>>,
    params: Params,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self {
            secret: None,
            params: Params::default(),
        }
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("keyed", &self.secret.is_some())
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .finish()
    }
}

impl CredentialStore {
    /// Store using Argon2id with the library's recommended cost.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with explicit memory (KiB) and iteration costs.
    ///
    /// Low costs keep tests fast; production uses [`CredentialStore::new`].
    pub fn with_cost(memory_kib: u32, iterations: u32) -> Result<Self, CredentialError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|err| CredentialError::configuration(err.to_string()))?;
        Ok(Self {
            secret: None,
            params,
        })
    }

    /// Mix a server secret into every digest.
    ///
    /// An empty secret leaves the store unkeyed.
    pub fn with_secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        let secret = secret.into();
        self.secret = (!secret.is_empty()).then(|| Arc::new(Zeroizing::new(secret)));
        self
    }

    fn argon2(&self) -> Result<Argon2<'_>, CredentialError> {
        match &self.secret {
            Some(secret) => Argon2::new_with_secret(
                secret.as_slice(),
                Algorithm::Argon2id,
                Version::V0x13,
                self.params.clone(),
            )
            .map_err(|err| CredentialError::configuration(err.to_string())),
            None => Ok(Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                self.params.clone(),
            )),
        }
    }

    /// Produce a salted digest of `plaintext`.
    ///
    /// Every call draws a fresh salt, so hashing the same password twice
    /// yields different digests.
    pub fn hash(&self, plaintext: &str) -> Result<PasswordHash, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| CredentialError::hashing(err.to_string()))?
            .to_string();
        PasswordHash::new(digest).map_err(|err| CredentialError::hashing(err.to_string()))
    }

    /// Return true iff `plaintext` produced `digest` under this scheme.
    ///
    /// Malformed digests verify as false.
    pub fn verify(&self, plaintext: &str, digest: &PasswordHash) -> bool {
        let Ok(parsed) = PhcString::new(digest.as_ref()) else {
            return false;
        };
        match self.argon2() {
            Ok(argon2) => argon2.verify_password(plaintext.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}
