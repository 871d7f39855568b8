//! Staff account management.
//!
//! Creation and deletion are restricted to the super admin; listing and
//! updates are open to any staff token.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::admin::{Admin, AdminPatch, AdminRole, NewAdmin};
use crate::domain::student::AccountStatus;
use crate::inbound::http::auth::BearerClaims;
use crate::inbound::http::error::{ApiError, ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Payload for staff account creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminCreateRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: AdminRole,
    #[serde(default = "default_status")]
    pub status: AccountStatus,
}

fn default_role() -> AdminRole {
    AdminRole::Admin
}

fn default_status() -> AccountStatus {
    AccountStatus::Active
}

/// Partial update; a present password is re-digested before storage.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdminUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<AdminRole>,
    pub status: Option<AccountStatus>,
}

/// Confirmation body for deletions.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminDeleted {
    pub message: String,
    pub deleted_id: i64,
}

/// Create a staff account. Super admin only.
#[utoipa::path(
    post,
    path = "/super-admin/admins",
    request_body = AdminCreateRequest,
    responses(
        (status = 200, description = "Stored account", body = Admin),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not the super admin", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["super-admin"]
)]
#[post("/admins")]
pub async fn add_admin(
    state: web::Data<HttpState>,
    claims: BearerClaims,
    payload: web::Json<AdminCreateRequest>,
) -> ApiResult<web::Json<Admin>> {
    claims.require_super_admin()?;
    let payload = payload.into_inner();
    let stored = state
        .admins
        .insert(NewAdmin {
            name: payload.name,
            email: payload.email,
            password_digest: state.hasher.digest(&payload.password),
            role: payload.role,
            status: payload.status,
        })
        .await?;
    Ok(web::Json(stored))
}

/// List staff accounts, highest id first. Any staff token.
#[utoipa::path(
    get,
    path = "/super-admin/admins",
    responses(
        (status = 200, description = "All staff accounts", body = [Admin]),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not staff", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["super-admin"]
)]
#[get("/admins")]
pub async fn list_admins(
    state: web::Data<HttpState>,
    claims: BearerClaims,
) -> ApiResult<web::Json<Vec<Admin>>> {
    claims.require_admin_or_super()?;
    let admins = state.admins.list().await?;
    Ok(web::Json(admins))
}

/// Patch a staff account. Any staff token.
#[utoipa::path(
    put,
    path = "/super-admin/admins/{id}",
    request_body = AdminUpdateRequest,
    responses(
        (status = 200, description = "Updated account", body = Admin),
        (status = 400, description = "Empty patch", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not staff", body = ErrorBody),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["super-admin"]
)]
#[put("/admins/{id}")]
pub async fn update_admin(
    state: web::Data<HttpState>,
    claims: BearerClaims,
    id: web::Path<i64>,
    payload: web::Json<AdminUpdateRequest>,
) -> ApiResult<web::Json<Admin>> {
    claims.require_admin_or_super()?;
    let payload = payload.into_inner();
    let patch = AdminPatch {
        name: payload.name,
        email: payload.email,
        password_digest: payload
            .password
            .map(|password| state.hasher.digest(&password)),
        contact: None,
        role: payload.role,
        status: payload.status,
    };
    if patch.is_empty() {
        return Err(ApiError::invalid_request("No valid fields to update."));
    }
    let updated = state
        .admins
        .update(id.into_inner(), patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Admin not found."))?;
    Ok(web::Json(updated))
}

/// Delete a staff account. Super admin only.
#[utoipa::path(
    delete,
    path = "/super-admin/admins/{id}",
    responses(
        (status = 200, description = "Deletion confirmation", body = AdminDeleted),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Caller is not the super admin", body = ErrorBody),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["super-admin"]
)]
#[delete("/admins/{id}")]
pub async fn delete_admin(
    state: web::Data<HttpState>,
    claims: BearerClaims,
    id: web::Path<i64>,
) -> ApiResult<web::Json<AdminDeleted>> {
    claims.require_super_admin()?;
    let id = id.into_inner();
    let removed = state.admins.delete(id).await?;
    if !removed {
        return Err(ApiError::not_found("Admin not found or already deleted."));
    }
    Ok(web::Json(AdminDeleted {
        message: "Admin deleted successfully".to_owned(),
        deleted_id: id,
    }))
}
