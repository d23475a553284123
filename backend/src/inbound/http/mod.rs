//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod home;
pub mod state;

pub use error::{ErrorBody, json_config};
pub use state::HttpState;

use actix_web::web;

/// Register every HTTP route.
///
/// Callers supply [`HttpState`] and [`health::HealthState`] as app data and
/// install [`json_config`] so body errors keep the `{"error": ...}` shape.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use signup_backend::inbound::http::{json_config, routes};
///
/// let app = App::new().app_data(json_config()).configure(routes);
/// ```
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/auth").service(auth::signup))
        .service(home::home)
        .service(home::test_db)
        .service(health::ready)
        .service(health::live);
}
