//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request, response, and error schemas they exchange. The
//! generated document is served by Swagger UI in debug builds and exported
//! via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::UserSummary;
use crate::inbound::http::auth::{SignupRequestBody, SignupResponse};
use crate::inbound::http::error::ErrorBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Signup backend API",
        description = "Account signup over HTTP with health and store probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::home::home,
        crate::inbound::http::home::test_db,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(SignupRequestBody, SignupResponse, UserSummary, ErrorBody)),
    tags(
        (name = "auth", description = "Account creation"),
        (name = "service", description = "Welcome banner and store probe"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
