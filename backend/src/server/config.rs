//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use signup_backend::domain::CredentialStore;
use signup_backend::domain::ports::UserStore;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) users: Arc<dyn UserStore>,
    pub(crate) credentials: CredentialStore,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a configuration serving signups from `users`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, users: Arc<dyn UserStore>) -> Self {
        Self {
            bind_addr,
            users,
            credentials: CredentialStore::new(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Replace the default credential store, e.g. to apply a server secret.
    #[must_use]
    pub fn with_credentials(mut self, credentials: CredentialStore) -> Self {
        self.credentials = credentials;
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
