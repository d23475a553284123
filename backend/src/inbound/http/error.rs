//! HTTP adapter mapping for domain errors.
//!
//! Every signup failure is a client-visible `400` carrying a single
//! `{"error": "<message>"}` object. Malformed request bodies are reported in
//! the same shape through [`json_config`].

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::SignupError;

/// Error payload returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure description.
    #[schema(example = "Email already registered")]
    pub error: String,
}

impl ErrorBody {
    /// Build a body carrying `error` as its only field.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl ResponseError for SignupError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

fn reject_payload(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, path = req.path(), "rejected request body");
    let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
    InternalError::from_response(err, response).into()
}

/// JSON extractor configuration rendering body errors as [`ErrorBody`].
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(reject_payload)
}
