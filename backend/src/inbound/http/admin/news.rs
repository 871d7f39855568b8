//! Admin news management.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::news::{NewNewsItem, NewsItem, NewsPatch};
use crate::inbound::http::error::{ApiError, ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Payload for news creation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct NewsCreateRequest {
    pub title: String,
    pub content: String,
    pub created_by: i64,
}

/// Confirmation body for deletions.
#[derive(Debug, Serialize, ToSchema)]
pub struct NewsDeleted {
    pub message: String,
    pub deleted_id: i64,
}

/// Publish a news entry.
#[utoipa::path(
    post,
    path = "/admin/news",
    request_body = NewsCreateRequest,
    responses(
        (status = 200, description = "Stored news item", body = NewsItem),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[post("/news")]
pub async fn add_news(
    state: web::Data<HttpState>,
    payload: web::Json<NewsCreateRequest>,
) -> ApiResult<web::Json<NewsItem>> {
    let now = state.clock.now();
    let payload = payload.into_inner();
    let stored = state
        .news
        .insert(NewNewsItem {
            title: payload.title,
            content: payload.content,
            created_by: payload.created_by,
            created_at: now,
            updated_at: Some(now),
        })
        .await?;
    Ok(web::Json(stored))
}

/// List every news entry, newest first.
#[utoipa::path(
    get,
    path = "/admin/news",
    responses(
        (status = 200, description = "All news", body = [NewsItem]),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[get("/news")]
pub async fn list_news(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<NewsItem>>> {
    let news = state.news.list().await?;
    Ok(web::Json(news))
}

/// Patch a news entry's title or content.
#[utoipa::path(
    put,
    path = "/admin/news/{id}",
    request_body = NewsPatch,
    responses(
        (status = 200, description = "Updated news item", body = NewsItem),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[put("/news/{id}")]
pub async fn update_news(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    patch: web::Json<NewsPatch>,
) -> ApiResult<web::Json<NewsItem>> {
    let updated = state
        .news
        .update(id.into_inner(), patch.into_inner(), state.clock.now())
        .await?
        .ok_or_else(|| ApiError::not_found("News not found."))?;
    Ok(web::Json(updated))
}

/// Delete a news entry.
#[utoipa::path(
    delete,
    path = "/admin/news/{id}",
    responses(
        (status = 200, description = "Deletion confirmation", body = NewsDeleted),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[delete("/news/{id}")]
pub async fn delete_news(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<web::Json<NewsDeleted>> {
    let id = id.into_inner();
    let removed = state.news.delete(id).await?;
    if !removed {
        return Err(ApiError::not_found("News not found or already deleted."));
    }
    Ok(web::Json(NewsDeleted {
        message: "News deleted successfully".to_owned(),
        deleted_id: id,
    }))
}
