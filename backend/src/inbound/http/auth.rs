//! Account signup handler.
//!
//! ```text
//! POST /api/auth/signup {"email":"u1@x.com","username":"u1","password":"secret"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{SignupError, SignupRequest, UserSummary};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Success message returned with every created account.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "User created successfully";

/// Signup request body for `POST /api/auth/signup`.
///
/// Absent fields deserialise as `None` so the use-case reports which one is
/// missing instead of a generic body error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SignupRequestBody {
    #[serde(default)]
    #[schema(example = "u1@x.com")]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(example = "u1")]
    pub username: Option<String>,
    #[serde(default)]
    #[schema(example = "secret")]
    pub password: Option<String>,
}

impl TryFrom<SignupRequestBody> for SignupRequest {
    type Error = SignupError;

    fn try_from(value: SignupRequestBody) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref().unwrap_or_default(),
            value.username.as_deref().unwrap_or_default(),
            value.password.as_deref().unwrap_or_default(),
        )
    }
}

/// Body of a `201 Created` signup response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    /// Fixed confirmation text, always [`SIGNUP_SUCCESS_MESSAGE`].
    #[schema(example = "User created successfully")]
    pub message: String,
    /// Public view of the account that was stored.
    pub user: UserSummary,
}

impl SignupResponse {
    /// Wrap a freshly created account in the success envelope.
    pub fn created(user: UserSummary) -> Self {
        Self {
            message: SIGNUP_SUCCESS_MESSAGE.to_owned(),
            user,
        }
    }
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequestBody,
    responses(
        (status = 201, description = "Account created", body = SignupResponse),
        (status = 400, description = "Rejected signup or malformed body", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequestBody>,
) -> Result<HttpResponse, SignupError> {
    let request = SignupRequest::try_from(payload.into_inner())?;
    let user = state.signup.signup(request).await?;
    Ok(HttpResponse::Created().json(SignupResponse::created(user)))
}
