//! News entries published by admins and read by students.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A published news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields required to insert a news item.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNewsItem {
    pub title: String,
    pub content: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Partial update: only present fields are written back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}
