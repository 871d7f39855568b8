//! Bearer-token extraction and role guards.
//!
//! Handlers that need an authenticated caller take [`BearerClaims`] as an
//! extractor; verification happens before the handler body runs. Role checks
//! are explicit calls so each route states its own policy.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::domain::auth::{Claims, Role};
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;

/// Claims recovered from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct BearerClaims(pub Claims);

impl BearerClaims {
    /// Allow only the super admin.
    pub fn require_super_admin(&self) -> Result<&Claims, ApiError> {
        if self.0.has_role(&[Role::SuperAdmin]) {
            Ok(&self.0)
        } else {
            Err(ApiError::forbidden("Access denied: Super Admins only"))
        }
    }

    /// Allow admins and the super admin.
    pub fn require_admin_or_super(&self) -> Result<&Claims, ApiError> {
        if self.0.has_role(&[Role::Admin, Role::SuperAdmin]) {
            Ok(&self.0)
        } else {
            Err(ApiError::forbidden(
                "Access denied: Admin or Super Admin only",
            ))
        }
    }
}

fn extract(req: &HttpRequest) -> Result<BearerClaims, ApiError> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| ApiError::new(
            crate::domain::ErrorCode::InternalError,
            "handler state missing",
        ))?;

    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    state
        .tokens
        .verify(token)
        .map(BearerClaims)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))
}

impl FromRequest for BearerClaims {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
