//! FAQ entity and its lifecycle states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Where a FAQ entry originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FaqSource {
    /// Typed in by an admin through the form fields.
    Manual,
    /// Produced from an uploaded PDF (extraction is mocked upstream).
    Pdf,
    /// Minted from an escalated student query.
    Text,
}

/// Review state of a FAQ entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FaqStatus {
    /// Awaiting admin review.
    Pending,
    /// Confirmed answer.
    Solved,
    /// Flagged as not answering its question.
    Unsolved,
}

/// A stored FAQ entry.
///
/// ## Invariants
/// - `id` is store-assigned and immutable.
/// - `question`, `answer`, and `status` are the only mutable fields; updates
///   stamp `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub source_type: FaqSource,
    pub source_file: Option<String>,
    pub created_by: i64,
    pub status: FaqStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields required to insert a FAQ; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFaq {
    pub question: String,
    pub answer: String,
    pub source_type: FaqSource,
    pub source_file: Option<String>,
    pub created_by: i64,
    pub status: FaqStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update: only present fields are written back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct FaqPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub status: Option<FaqStatus>,
}

/// The slice of a FAQ the matcher consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqCandidate {
    pub id: i64,
    pub question: String,
    pub answer: String,
}
