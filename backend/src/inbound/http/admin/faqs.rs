//! Admin FAQ management.
//!
//! Creation is a multipart form because the endpoint also accepts a PDF
//! upload. The upload lands in a transient temp file; content extraction is
//! mocked, so only the file name survives into the stored row.

use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{delete, get, post, put, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::faq::{Faq, FaqPatch, FaqSource, FaqStatus, NewFaq};
use crate::inbound::http::error::{ApiError, ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

const MOCKED_PDF_QUESTION: &str = "Extracted question from PDF";
const MOCKED_PDF_ANSWER: &str = "Extracted answer from PDF";

/// Multipart payload for FAQ creation.
#[derive(Debug, MultipartForm)]
pub struct FaqForm {
    pub question: Option<Text<String>>,
    pub answer: Option<Text<String>>,
    pub source_type: Option<Text<String>>,
    pub created_by: Text<i64>,
    pub file: Option<TempFile>,
}

/// Confirmation body for deletions.
#[derive(Debug, Serialize, ToSchema)]
pub struct FaqDeleted {
    pub message: String,
    pub deleted_id: i64,
}

fn parse_source(raw: Option<&str>) -> Result<FaqSource, ApiError> {
    match raw.unwrap_or("manual") {
        "manual" => Ok(FaqSource::Manual),
        "pdf" => Ok(FaqSource::Pdf),
        "text" => Ok(FaqSource::Text),
        other => Err(ApiError::invalid_request(format!(
            "unknown source_type: {other}"
        ))),
    }
}

/// Create a FAQ from form fields or an uploaded PDF.
#[utoipa::path(
    post,
    path = "/admin/faqs",
    responses(
        (status = 200, description = "Stored FAQ", body = Faq),
        (status = 400, description = "Missing fields or unknown source type", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[post("/faqs")]
pub async fn add_faq(
    state: web::Data<HttpState>,
    MultipartForm(form): MultipartForm<FaqForm>,
) -> ApiResult<web::Json<Faq>> {
    let source_type = parse_source(form.source_type.as_deref().map(String::as_str))?;
    let now = state.clock.now();

    let (question, answer, source_file) = match (source_type, form.file) {
        (FaqSource::Pdf, Some(upload)) => (
            MOCKED_PDF_QUESTION.to_owned(),
            MOCKED_PDF_ANSWER.to_owned(),
            upload.file_name.clone(),
        ),
        _ => {
            let question = form
                .question
                .map(Text::into_inner)
                .filter(|text| !text.trim().is_empty())
                .ok_or_else(|| ApiError::invalid_request("question is required"))?;
            let answer = form
                .answer
                .map(Text::into_inner)
                .filter(|text| !text.trim().is_empty())
                .ok_or_else(|| ApiError::invalid_request("answer is required"))?;
            (question, answer, None)
        }
    };

    let stored = state
        .faqs
        .insert(NewFaq {
            question,
            answer,
            source_type,
            source_file,
            created_by: form.created_by.into_inner(),
            status: FaqStatus::Pending,
            created_at: now,
            updated_at: Some(now),
        })
        .await?;
    Ok(web::Json(stored))
}

/// List every FAQ, newest first.
#[utoipa::path(
    get,
    path = "/admin/faqs",
    responses(
        (status = 200, description = "All FAQs", body = [Faq]),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[get("/faqs")]
pub async fn list_faqs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Faq>>> {
    let faqs = state
        .faqs
        .list()
        .await?;
    Ok(web::Json(faqs))
}

/// Patch a FAQ's question, answer, or status.
#[utoipa::path(
    put,
    path = "/admin/faqs/{id}",
    request_body = FaqPatch,
    responses(
        (status = 200, description = "Updated FAQ", body = Faq),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[put("/faqs/{id}")]
pub async fn update_faq(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    patch: web::Json<FaqPatch>,
) -> ApiResult<web::Json<Faq>> {
    let updated = state
        .faqs
        .update(id.into_inner(), patch.into_inner(), state.clock.now())
        .await?
        .ok_or_else(|| ApiError::not_found("FAQ not found"))?;
    Ok(web::Json(updated))
}

/// Delete a FAQ.
#[utoipa::path(
    delete,
    path = "/admin/faqs/{id}",
    responses(
        (status = 200, description = "Deletion confirmation", body = FaqDeleted),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[delete("/faqs/{id}")]
pub async fn delete_faq(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<FaqDeleted>> {
    let id = id.into_inner();
    let removed = state
        .faqs
        .delete(id)
        .await?;
    if !removed {
        return Err(ApiError::not_found("FAQ not found"));
    }
    Ok(web::Json(FaqDeleted {
        message: "FAQ deleted successfully".to_owned(),
        deleted_id: id,
    }))
}
