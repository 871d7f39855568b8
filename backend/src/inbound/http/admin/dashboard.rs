//! Admin dashboard endpoint.

use actix_web::{get, web};

use crate::domain::dashboard::DashboardStats;
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Dashboard statistics, computed fresh from store counts on every call.
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard counts and success rate", body = DashboardStats),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[get("/dashboard")]
pub async fn get_dashboard(state: web::Data<HttpState>) -> ApiResult<web::Json<DashboardStats>> {
    let stats = state.dashboard_service().stats().await?;
    Ok(web::Json(stats))
}
