//! Port abstraction for chat-log persistence adapters.

use async_trait::async_trait;

use crate::domain::chat::{ChatBackfill, ChatLogEntry, NewChatLogEntry};
use crate::domain::ports::StoreError;

#[async_trait]
pub trait ChatLogRepository: Send + Sync {
    /// Append an entry and return the stored row.
    async fn insert(&self, entry: NewChatLogEntry) -> Result<ChatLogEntry, StoreError>;

    /// Fetch one entry by id.
    async fn find(&self, id: i64) -> Result<Option<ChatLogEntry>, StoreError>;

    /// A student's history, newest first.
    async fn history(&self, student_id: i64) -> Result<Vec<ChatLogEntry>, StoreError>;

    /// The most recent entry matching `(student_id, query_text)`, used as the
    /// escalation fallback when no explicit link was recorded.
    async fn find_latest(
        &self,
        student_id: i64,
        query_text: &str,
    ) -> Result<Option<ChatLogEntry>, StoreError>;

    /// Patch one entry in place; `false` when the id is unknown.
    async fn backfill(&self, id: i64, backfill: ChatBackfill) -> Result<bool, StoreError>;

    /// Remove an entry. Only the escalation saga's compensation path uses
    /// this; the log is otherwise append-only.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
