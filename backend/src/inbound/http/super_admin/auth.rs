//! Staff login; admins and the super admin share the endpoint, with the
//! role stamped from the stored record.

use actix_web::{post, web};

use crate::domain::auth::LoginCredentials;
use crate::domain::login::IssuedToken;
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::student::auth::LoginRequest;

/// Authenticate an admin or super admin and issue a bearer token.
#[utoipa::path(
    post,
    path = "/super-admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token", body = IssuedToken),
        (status = 401, description = "Password mismatch", body = ErrorBody),
        (status = 403, description = "Inactive account", body = ErrorBody),
        (status = 404, description = "Unknown email", body = ErrorBody)
    ),
    tags = ["super-admin"]
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<IssuedToken>> {
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)?;
    let token = state.admin_login().login(&credentials).await?;
    Ok(web::Json(token))
}
