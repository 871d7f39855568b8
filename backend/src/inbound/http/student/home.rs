//! Student home screen.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::news::NewsItem;
use crate::inbound::http::error::{ApiError, ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

const MOTIVATIONAL_QUOTE: &str =
    "The future depends on what you do today. — Mahatma Gandhi";
const LATEST_NEWS_LIMIT: u32 = 3;

/// Home screen payload: profile slice, quote, and the latest news.
#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    pub name: String,
    pub department: String,
    pub enrollment_no: String,
    pub motivational_quote: String,
    pub latest_news: Vec<NewsItem>,
}

/// Home screen for one student.
#[utoipa::path(
    get,
    path = "/student/home/{student_id}",
    responses(
        (status = 200, description = "Home payload", body = HomeResponse),
        (status = 404, description = "Unknown student", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["student"]
)]
#[get("/home/{student_id}")]
pub async fn home(
    state: web::Data<HttpState>,
    student_id: web::Path<i64>,
) -> ApiResult<web::Json<HomeResponse>> {
    let profile = state
        .students
        .find_profile(student_id.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found"))?;
    let latest_news = state.news.latest(LATEST_NEWS_LIMIT).await?;

    Ok(web::Json(HomeResponse {
        name: profile.name,
        department: profile.department,
        enrollment_no: profile.enrollment_no,
        motivational_quote: MOTIVATIONAL_QUOTE.to_owned(),
        latest_news,
    }))
}
