//! Super-admin profile, keyed by the `super_admin` role rather than an id.

use actix_web::{get, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::admin::{Admin, AdminPatch};
use crate::inbound::http::auth::BearerClaims;
use crate::inbound::http::error::{ApiError, ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Partial profile update.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub contact: Option<String>,
}

/// The super admin's own record.
#[utoipa::path(
    get,
    path = "/super-admin/profile",
    responses(
        (status = 200, description = "Profile", body = Admin),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not the super admin", body = ErrorBody),
        (status = 404, description = "No super-admin record", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["super-admin"]
)]
#[get("/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    claims: BearerClaims,
) -> ApiResult<web::Json<Admin>> {
    claims.require_super_admin()?;
    let profile = state
        .admins
        .find_super_admin()
        .await?
        .ok_or_else(|| ApiError::not_found("Super Admin not found."))?;
    Ok(web::Json(profile))
}

/// Update the super admin's name, email, or contact.
#[utoipa::path(
    put,
    path = "/super-admin/profile",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = Admin),
        (status = 400, description = "Empty patch", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not the super admin", body = ErrorBody),
        (status = 404, description = "No super-admin record", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["super-admin"]
)]
#[put("/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    claims: BearerClaims,
    payload: web::Json<ProfileUpdateRequest>,
) -> ApiResult<web::Json<Admin>> {
    claims.require_super_admin()?;
    let payload = payload.into_inner();
    let patch = AdminPatch {
        name: payload.name,
        email: payload.email,
        password_digest: None,
        contact: payload.contact,
        role: None,
        status: None,
    };
    if patch.is_empty() {
        return Err(ApiError::invalid_request("No valid fields to update."));
    }

    let current = state
        .admins
        .find_super_admin()
        .await?
        .ok_or_else(|| ApiError::not_found("Super Admin not found."))?;
    let updated = state
        .admins
        .update(current.id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Super Admin not found."))?;
    Ok(web::Json(updated))
}
