//! Chat log entries and the request/reply shapes of the chatbot endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Resolution state of a logged interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    Solved,
    Unsolved,
}

/// One logged chatbot interaction.
///
/// The log is append-only except for the escalation backfill, which patches
/// `bot_response`, `status`, and `updated_at` on a single entry in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatLogEntry {
    pub id: i64,
    pub student_id: i64,
    pub query_text: String,
    pub detected_language: Option<String>,
    pub bot_response: String,
    pub faq_id: Option<i64>,
    pub status: ChatStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields required to append a chat log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewChatLogEntry {
    pub student_id: i64,
    pub query_text: String,
    pub detected_language: Option<String>,
    pub bot_response: String,
    pub faq_id: Option<i64>,
    pub status: ChatStatus,
    pub created_at: DateTime<Utc>,
}

/// The escalation backfill applied to an existing entry. `updated_at` is
/// optional so the saga's compensation path can restore a never-updated row.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatBackfill {
    pub bot_response: String,
    pub status: ChatStatus,
    pub updated_at: Option<DateTime<Utc>>,
}

/// An incoming student question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub student_id: i64,
    pub query_text: String,
    pub detected_language: Option<String>,
}

/// What the chatbot answers with.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChatReply {
    pub query_text: String,
    pub bot_response: String,
    pub status: ChatStatus,
    pub created_at: DateTime<Utc>,
}
