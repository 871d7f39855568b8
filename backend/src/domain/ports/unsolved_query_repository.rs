//! Port abstraction for the unsolved-query review queue.

use async_trait::async_trait;

use crate::domain::unsolved::{NewUnsolvedQuery, UnsolvedQuery};
use crate::domain::ports::StoreError;

#[async_trait]
pub trait UnsolvedQueryRepository: Send + Sync {
    /// Enqueue a query and return the stored row.
    async fn insert(&self, query: NewUnsolvedQuery) -> Result<UnsolvedQuery, StoreError>;

    /// Record the chat log entry written for this queue entry.
    async fn link_chat_log(&self, id: i64, chat_log_id: i64) -> Result<(), StoreError>;

    /// Queue entries still awaiting review, newest first.
    async fn list_unreviewed(&self) -> Result<Vec<UnsolvedQuery>, StoreError>;

    /// Fetch one entry by id.
    async fn find(&self, id: i64) -> Result<Option<UnsolvedQuery>, StoreError>;

    /// Toggle the reviewed flag.
    async fn set_reviewed(&self, id: i64, reviewed: bool) -> Result<(), StoreError>;

    /// Remove an entry (the solved path); `false` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Total queue length, reviewed or not.
    async fn count(&self) -> Result<u64, StoreError>;
}
