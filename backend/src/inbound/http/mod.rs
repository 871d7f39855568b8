//! HTTP inbound adapter exposing the REST surface.

pub mod admin;
pub mod auth;
pub mod error;
pub mod health;
pub mod state;
pub mod student;
pub mod super_admin;

use actix_web::{get, web, HttpResponse};
use serde_json::json;

pub use error::{ApiError, ApiResult};
pub use state::HttpState;

/// Root banner, useful as a smoke check that routing is wired.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Campus helpdesk backend running" }))
}

/// Register every role scope plus the root banner. The caller provides
/// [`HttpState`] and [`health::HealthState`] via `app_data`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(health::live)
        .service(health::ready)
        .service(admin::scope())
        .service(student::scope())
        .service(super_admin::scope());
}
