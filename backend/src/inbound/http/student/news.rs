//! Student-facing news feed.

use actix_web::{get, web};

use crate::domain::news::NewsItem;
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// All news, newest first. An empty feed is an empty list, not a 404.
#[utoipa::path(
    get,
    path = "/student/news",
    responses(
        (status = 200, description = "News feed", body = [NewsItem]),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["student"]
)]
#[get("/news")]
pub async fn list_news(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<NewsItem>>> {
    let news = state.news.list().await?;
    Ok(web::Json(news))
}
