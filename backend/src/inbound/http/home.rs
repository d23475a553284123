//! Plain-text service routes: the welcome banner and the store probe.
//!
//! ```text
//! GET /         -> "Welcome to the API!"
//! GET /test-db  -> "Database connection successful!" | "Database error: <cause>"
//! ```

use actix_web::{HttpResponse, get, web};
use tracing::warn;

use super::state::HttpState;

/// Plain-text banner served at `/`.
pub const WELCOME_MESSAGE: &str = "Welcome to the API!";
/// Body of `/test-db` when the user store answers.
pub const DATABASE_OK_MESSAGE: &str = "Database connection successful!";

/// Welcome banner.
#[utoipa::path(
    get,
    path = "/",
    tags = ["service"],
    responses((status = 200, description = "Welcome banner", body = String, content_type = "text/plain"))
)]
#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(WELCOME_MESSAGE)
}

/// Read at most one record from the store and report the outcome.
///
/// Both outcomes answer `200`; the body tells them apart.
#[utoipa::path(
    get,
    path = "/test-db",
    tags = ["service"],
    responses((status = 200, description = "Store probe outcome", body = String, content_type = "text/plain"))
)]
#[get("/test-db")]
pub async fn test_db(state: web::Data<HttpState>) -> HttpResponse {
    let body = match state.users.probe().await {
        Ok(()) => DATABASE_OK_MESSAGE.to_owned(),
        Err(error) => {
            warn!(%error, "store probe failed");
            format!("Database error: {error}")
        }
    };
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    use crate::domain::ports::{MockSignupCommand, MockUserStore, UserStoreError};

    fn state_with(users: MockUserStore) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(MockSignupCommand::new()),
            Arc::new(users),
        ))
    }

    async fn get_text(state: web::Data<HttpState>, uri: &str) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new().app_data(state).service(home).service(test_db),
        )
        .await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, String::from_utf8(body.to_vec()).expect("utf-8 body"))
    }

    #[rstest]
    #[actix_web::test]
    async fn home_greets() {
        let (status, body) = get_text(state_with(MockUserStore::new()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, WELCOME_MESSAGE);
    }

    #[rstest]
    #[actix_web::test]
    async fn test_db_reports_success() {
        let mut users = MockUserStore::new();
        users.expect_probe().times(1).returning(|| Ok(()));

        let (status, body) = get_text(state_with(users), "/test-db").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, DATABASE_OK_MESSAGE);
    }

    #[rstest]
    #[actix_web::test]
    async fn test_db_reports_failure_with_ok_status() {
        let mut users = MockUserStore::new();
        users
            .expect_probe()
            .times(1)
            .returning(|| Err(UserStoreError::connection("refused")));

        let (status, body) = get_text(state_with(users), "/test-db").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            "Database error: user store connection failed: refused"
        );
    }
}
