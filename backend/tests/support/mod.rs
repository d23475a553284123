//! Shared helpers for integration tests.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use signup_backend::Trace;
use signup_backend::domain::ports::UserStore;
use signup_backend::domain::{CredentialStore, SignupService};
use signup_backend::inbound::http::health::HealthState;
use signup_backend::inbound::http::{HttpState, json_config, routes};

/// Environment variable naming the PostgreSQL database used by adapter tests.
pub const TEST_DATABASE_URL: &str = "SIGNUP_TEST_DATABASE_URL";

/// Return the adapter test database URL, or `None` with a skip marker.
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL} is not set");
            None
        }
    }
}

/// Credential store with minimal Argon2 cost so tests stay fast.
pub fn cheap_credentials() -> CredentialStore {
    CredentialStore::with_cost(8, 1).expect("cheap Argon2 parameters are valid")
}

/// Build the full HTTP application over `users`.
pub fn signup_app(
    users: Arc<dyn UserStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let signup = SignupService::new(Arc::clone(&users), cheap_credentials());
    let health = HealthState::new();
    health.mark_ready();
    App::new()
        .app_data(web::Data::new(health))
        .app_data(web::Data::new(HttpState::new(Arc::new(signup), users)))
        .app_data(json_config())
        .wrap(Trace)
        .configure(routes)
}
