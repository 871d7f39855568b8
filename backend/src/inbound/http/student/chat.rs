//! Student chatbot endpoints.

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::chat::{ChatPrompt, ChatReply, ChatStatus};
use crate::inbound::http::error::{ApiError, ApiResult, ErrorBody};
use crate::inbound::http::state::HttpState;

fn default_language() -> Option<String> {
    Some("en".to_owned())
}

/// Incoming chatbot question.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub student_id: i64,
    pub query_text: String,
    #[serde(default = "default_language")]
    pub detected_language: Option<String>,
}

/// One row of a student's chat history.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatHistoryEntry {
    pub query_text: String,
    pub bot_response: String,
    pub status: ChatStatus,
    pub created_at: DateTime<Utc>,
}

/// Answer a student question from the FAQ set, logging the interaction and
/// queueing unmatched questions for review.
#[utoipa::path(
    post,
    path = "/student/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Bot reply", body = ChatReply),
        (status = 400, description = "Blank query", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["student"]
)]
#[post("/chat")]
pub async fn send_chat(
    state: web::Data<HttpState>,
    payload: web::Json<ChatRequest>,
) -> ApiResult<web::Json<ChatReply>> {
    let payload = payload.into_inner();
    let reply = state
        .chat_service()
        .resolve(ChatPrompt {
            student_id: payload.student_id,
            query_text: payload.query_text,
            detected_language: payload.detected_language,
        })
        .await?;
    Ok(web::Json(reply))
}

/// A student's full chat history, newest first.
#[utoipa::path(
    get,
    path = "/student/chat/{student_id}",
    responses(
        (status = 200, description = "Chat history", body = [ChatHistoryEntry]),
        (status = 404, description = "No history for this student", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tags = ["student"]
)]
#[get("/chat/{student_id}")]
pub async fn chat_history(
    state: web::Data<HttpState>,
    student_id: web::Path<i64>,
) -> ApiResult<web::Json<Vec<ChatHistoryEntry>>> {
    let entries = state.chat_logs.history(student_id.into_inner()).await?;
    if entries.is_empty() {
        return Err(ApiError::not_found(
            "No chat history found for this student.",
        ));
    }
    let history = entries
        .into_iter()
        .map(|entry| ChatHistoryEntry {
            query_text: entry.query_text,
            bot_response: entry.bot_response,
            status: entry.status,
            created_at: entry.created_at,
        })
        .collect();
    Ok(web::Json(history))
}
