//! Admin review queue: list unreviewed queries and escalate them.

use actix_web::{get, put, web};

use crate::domain::unsolved::{EscalationOutcome, EscalationRequest, UnsolvedQuery};
use crate::inbound::http::error::{ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

/// Unreviewed queries, newest first.
#[utoipa::path(
    get,
    path = "/admin/unsolved",
    responses(
        (status = 200, description = "Queue entries awaiting review", body = [UnsolvedQuery]),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[get("/unsolved")]
pub async fn list_unsolved(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UnsolvedQuery>>> {
    let queue = state.unsolved.list_unreviewed().await?;
    Ok(web::Json(queue))
}

/// Mark a query reviewed, optionally promoting it into a FAQ and backfilling
/// the student's chat history.
#[utoipa::path(
    put,
    path = "/admin/unsolved/{id}",
    request_body = EscalationRequest,
    responses(
        (status = 200, description = "Escalation outcome", body = EscalationOutcome),
        (status = 404, description = "Unknown id", body = ErrorBody),
        (status = 500, description = "Store failure mid-sequence (compensated)", body = ErrorBody)
    ),
    tags = ["admin"]
)]
#[put("/unsolved/{id}")]
pub async fn update_unsolved(
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    payload: web::Json<EscalationRequest>,
) -> ApiResult<web::Json<EscalationOutcome>> {
    let outcome = state
        .escalation_service()
        .resolve(id.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(outcome))
}
