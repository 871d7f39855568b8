//! Port abstraction for news persistence adapters.

use async_trait::async_trait;

use crate::domain::news::{NewNewsItem, NewsItem, NewsPatch};
use crate::domain::ports::StoreError;

#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Insert a news item and return the stored row.
    async fn insert(&self, item: NewNewsItem) -> Result<NewsItem, StoreError>;

    /// All news, newest first.
    async fn list(&self) -> Result<Vec<NewsItem>, StoreError>;

    /// The `limit` most recent items for the student home screen.
    async fn latest(&self, limit: u32) -> Result<Vec<NewsItem>, StoreError>;

    /// Apply a partial update, stamping `updated_at`; `None` when the id is
    /// unknown.
    async fn update(
        &self,
        id: i64,
        patch: NewsPatch,
        updated_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<NewsItem>, StoreError>;

    /// Delete by id; `false` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
