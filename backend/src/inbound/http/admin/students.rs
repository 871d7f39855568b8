//! Admin student management.
//!
//! Passwords are digested before they reach a repository; listings never
//! include the digest.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::student::{AccountStatus, NewStudent, Student, StudentPatch};
use crate::inbound::http::error::{ApiError, ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Payload for student registration.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentCreateRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub enrollment_no: String,
}

/// Partial update; a present password is re-digested before storage.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StudentUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub department: Option<String>,
    pub enrollment_no: Option<String>,
    pub status: Option<AccountStatus>,
}

/// Confirmation body for deletions.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentDeleted {
    pub message: String,
    pub deleted_id: i64,
}

/// Register a student; the account starts active with the student role.
#[utoipa::path(
    post,
    path = "/admin/students",
    request_body = StudentCreateRequest,
    responses(
        (status = 200, description = "Stored student", body = Student),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[post("/students")]
pub async fn add_student(
    state: web::Data<HttpState>,
    payload: web::Json<StudentCreateRequest>,
) -> ApiResult<web::Json<Student>> {
    let payload = payload.into_inner();
    let stored = state
        .students
        .insert(NewStudent {
            name: payload.name,
            email: payload.email,
            password_digest: state.hasher.digest(&payload.password),
            department: payload.department,
            enrollment_no: payload.enrollment_no,
        })
        .await?;
    Ok(web::Json(stored))
}

/// List every student, highest id first.
#[utoipa::path(
    get,
    path = "/admin/students",
    responses(
        (status = 200, description = "All students, digests excluded", body = [Student]),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[get("/students")]
pub async fn list_students(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Student>>> {
    let students = state.students.list().await?;
    Ok(web::Json(students))
}

/// Patch a student record.
#[utoipa::path(
    put,
    path = "/admin/students/{id}",
    request_body = StudentUpdateRequest,
    responses(
        (status = 200, description = "Updated student", body = Student),
        (status = 400, description = "Empty patch", body = ErrorBody),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: web::Json<StudentUpdateRequest>,
) -> ApiResult<web::Json<Student>> {
    let payload = payload.into_inner();
    let patch = StudentPatch {
        name: payload.name,
        email: payload.email,
        password_digest: payload
            .password
            .map(|password| state.hasher.digest(&password)),
        department: payload.department,
        enrollment_no: payload.enrollment_no,
        status: payload.status,
    };
    if patch.is_empty() {
        return Err(ApiError::invalid_request("No valid fields to update."));
    }
    let updated = state
        .students
        .update(id.into_inner(), patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found."))?;
    Ok(web::Json(updated))
}

/// Delete a student.
#[utoipa::path(
    delete,
    path = "/admin/students/{id}",
    responses(
        (status = 200, description = "Deletion confirmation", body = StudentDeleted),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<StudentDeleted>> {
    let id = id.into_inner();
    let removed = state.students.delete(id).await?;
    if !removed {
        return Err(ApiError::not_found("Student not found."));
    }
    Ok(web::Json(StudentDeleted {
        message: "Student deleted successfully".to_owned(),
        deleted_id: id,
    }))
}
