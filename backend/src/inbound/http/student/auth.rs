//! Student login.

use actix_web::{post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::auth::LoginCredentials;
use crate::domain::login::IssuedToken;
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Login payload shared by the student and staff endpoints.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authenticate a student and issue a bearer token.
#[utoipa::path(
    post,
    path = "/student/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token", body = IssuedToken),
        (status = 401, description = "Password mismatch", body = ErrorBody),
        (status = 403, description = "Inactive account", body = ErrorBody),
        (status = 404, description = "Unknown email", body = ErrorBody)
    ),
    tags = ["student"]
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<IssuedToken>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)?;
    let token = state.student_login().login(&credentials).await?;
    Ok(web::Json(token))
}
