//! The review queue for student questions the matcher could not answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A queued question awaiting admin review.
///
/// `chat_log_id` links the queue entry to the chat log row recorded for the
/// same question, so escalation patches the exact entry instead of guessing
/// by `(student_id, query_text)`. Entries written before the link existed
/// carry `None` and fall back to the value match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UnsolvedQuery {
    pub id: i64,
    pub student_id: i64,
    pub query_text: String,
    pub created_at: DateTime<Utc>,
    pub reviewed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_log_id: Option<i64>,
}

/// Fields required to enqueue an unsolved query.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUnsolvedQuery {
    pub student_id: i64,
    pub query_text: String,
    pub created_at: DateTime<Utc>,
    pub reviewed: bool,
}

/// Admin decision applied to a queued query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct EscalationRequest {
    /// Always applied to the queue entry, even when nothing else changes.
    #[serde(default = "default_reviewed")]
    pub reviewed: bool,
    /// When true, the query is promoted into a FAQ and the student's chat
    /// history is backfilled with the answer.
    pub solved: Option<bool>,
    /// Answer text for the minted FAQ; a placeholder is used when absent.
    pub answer: Option<String>,
}

fn default_reviewed() -> bool {
    true
}

/// Result of an escalation, echoed to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EscalationOutcome {
    pub message: String,
    pub linked_to_student_chat: bool,
}

impl EscalationOutcome {
    /// Outcome for the solved path: FAQ minted and chat history updated.
    pub fn solved() -> Self {
        Self {
            message: "Query solved, added to FAQs, and student chat updated.".to_owned(),
            linked_to_student_chat: true,
        }
    }

    /// Outcome when only the reviewed flag changed.
    pub fn reviewed_only() -> Self {
        Self {
            message: "Query marked as reviewed".to_owned(),
            linked_to_student_chat: false,
        }
    }
}
