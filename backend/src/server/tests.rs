//! Tests for server bootstrap: readiness signalling and route wiring.

use super::*;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use signup_backend::domain::TRACE_ID_HEADER;
use signup_backend::outbound::memory::InMemoryUserStore;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn config() -> ServerConfig {
    let bind_addr = "127.0.0.1:0".parse().expect("loopback address");
    ServerConfig::new(bind_addr, Arc::new(InMemoryUserStore::new()))
}

#[rstest]
#[actix_web::test]
async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config).expect("server should bind");

    assert!(health_state.is_ready(), "server creation should mark readiness");
}

#[cfg(feature = "metrics")]
#[rstest]
#[actix_web::test]
async fn create_server_accepts_metrics(health_state: web::Data<HealthState>, config: ServerConfig) {
    let config = config.with_metrics(default_metrics());

    let _server = create_server(health_state.clone(), config).expect("server should bind");

    assert!(health_state.is_ready());
}

#[cfg(feature = "metrics")]
#[rstest]
#[actix_web::test]
async fn metrics_endpoint_reports_served_requests(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    use super::metrics::METRICS_NAMESPACE;

    let app = actix_test::init_service(
        build_app(health_state, build_http_state(&config))
            .wrap(OptionalMetrics::new(default_metrics())),
    )
    .await;

    let welcome =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(welcome.status(), StatusCode::OK);

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/metrics").to_request())
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    let exposition = std::str::from_utf8(&body).expect("metrics are UTF-8 text");
    assert!(
        exposition.contains(&format!("{METRICS_NAMESPACE}_http_requests_total")),
        "request counter missing from {exposition}"
    );
}

#[rstest]
#[actix_web::test]
async fn app_serves_signup_with_trace_header(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    let app = actix_test::init_service(build_app(health_state, build_http_state(&config))).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({"email": "u1@x.com", "username": "u1", "password": "secret"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["user"]["username"], "u1");
}

#[cfg(debug_assertions)]
#[rstest]
#[actix_web::test]
async fn debug_builds_serve_the_openapi_document(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) {
    let app = actix_test::init_service(build_app(health_state, build_http_state(&config))).await;

    let request = actix_test::TestRequest::get()
        .uri("/api-docs/openapi.json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert!(body["paths"].get("/api/auth/signup").is_some());
}
