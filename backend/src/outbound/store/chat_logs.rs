//! Store adapter for the `chat_logs` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::chat::{ChatBackfill, ChatLogEntry, ChatStatus, NewChatLogEntry};
use crate::domain::ports::{ChatLogRepository, StoreError};
use crate::outbound::store::client::{StoreClient, TableQuery};

const TABLE: &str = "chat_logs";

pub struct StoreChatLogRepository {
    store: Arc<StoreClient>,
}

impl StoreChatLogRepository {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct ChatLogRow {
    id: i64,
    student_id: i64,
    query_text: String,
    #[serde(default)]
    detected_language: Option<String>,
    bot_response: String,
    #[serde(default)]
    faq_id: Option<i64>,
    status: ChatStatus,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<ChatLogRow> for ChatLogEntry {
    fn from(row: ChatLogRow) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            query_text: row.query_text,
            detected_language: row.detected_language,
            bot_response: row.bot_response,
            faq_id: row.faq_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewChatLogRow {
    student_id: i64,
    query_text: String,
    detected_language: Option<String>,
    bot_response: String,
    faq_id: Option<i64>,
    status: ChatStatus,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct BackfillRow {
    bot_response: String,
    status: ChatStatus,
    updated_at: Option<DateTime<Utc>>,
}

#[async_trait]
impl ChatLogRepository for StoreChatLogRepository {
    async fn insert(&self, entry: NewChatLogEntry) -> Result<ChatLogEntry, StoreError> {
        let row = NewChatLogRow {
            student_id: entry.student_id,
            query_text: entry.query_text,
            detected_language: entry.detected_language,
            bot_response: entry.bot_response,
            faq_id: entry.faq_id,
            status: entry.status,
            created_at: entry.created_at,
        };
        let stored: ChatLogRow = self.store.insert(TABLE, &row).await?;
        Ok(stored.into())
    }

    async fn find(&self, id: i64) -> Result<Option<ChatLogEntry>, StoreError> {
        let mut rows: Vec<ChatLogRow> = self
            .store
            .select(TABLE, TableQuery::new().eq("id", id))
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0).into())
        })
    }

    async fn history(&self, student_id: i64) -> Result<Vec<ChatLogEntry>, StoreError> {
        let rows: Vec<ChatLogRow> = self
            .store
            .select(
                TABLE,
                TableQuery::new()
                    .eq("student_id", student_id)
                    .order_desc("created_at"),
            )
            .await?;
        Ok(rows.into_iter().map(ChatLogEntry::from).collect())
    }

    async fn find_latest(
        &self,
        student_id: i64,
        query_text: &str,
    ) -> Result<Option<ChatLogEntry>, StoreError> {
        let mut rows: Vec<ChatLogRow> = self
            .store
            .select(
                TABLE,
                TableQuery::new()
                    .eq("student_id", student_id)
                    .eq("query_text", query_text)
                    .order_desc("created_at")
                    .limit(1),
            )
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0).into())
        })
    }

    async fn backfill(&self, id: i64, backfill: ChatBackfill) -> Result<bool, StoreError> {
        let patch = BackfillRow {
            bot_response: backfill.bot_response,
            status: backfill.status,
            updated_at: backfill.updated_at,
        };
        let rows: Vec<ChatLogRow> = self
            .store
            .update(TABLE, TableQuery::new().eq("id", id), &patch)
            .await?;
        Ok(!rows.is_empty())
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let removed = self
            .store
            .delete(TABLE, TableQuery::new().eq("id", id))
            .await?;
        Ok(removed > 0)
    }
}
