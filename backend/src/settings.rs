//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SIGNUP_*` environment variables, or a config
//! file. The unprefixed `DATABASE_URL` and `SECRET_KEY` variables are honoured
//! when their prefixed counterparts are absent.

use std::env;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DATABASE_URL_FALLBACK: &str = "DATABASE_URL";
const SECRET_KEY_FALLBACK: &str = "SECRET_KEY";

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr { value: String, message: String },
}

/// Runtime configuration for the signup server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SIGNUP")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Optional server secret mixed into password hashes.
    pub secret_key: Option<String>,
    /// Apply embedded migrations before serving; on unless set to `false`.
    pub run_migrations: Option<bool>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|candidate| !candidate.trim().is_empty())
}

impl ServerSettings {
    /// Return the parsed bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Return the database URL, consulting `DATABASE_URL` when unset.
    pub fn database_url(&self) -> Option<String> {
        non_blank(self.database_url.clone())
            .or_else(|| non_blank(env::var(DATABASE_URL_FALLBACK).ok()))
    }

    /// Return the hashing secret, consulting `SECRET_KEY` when unset.
    pub fn secret_key(&self) -> Option<Zeroizing<String>> {
        non_blank(self.secret_key.clone())
            .or_else(|| non_blank(env::var(SECRET_KEY_FALLBACK).ok()))
            .map(Zeroizing::new)
    }

    /// Whether to apply embedded migrations at startup, defaulting to `true`.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }
}
