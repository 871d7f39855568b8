//! Store adapter for the `news` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::news::{NewNewsItem, NewsItem, NewsPatch};
use crate::domain::ports::{NewsRepository, StoreError};
use crate::outbound::store::client::{StoreClient, TableQuery};

const TABLE: &str = "news";

pub struct StoreNewsRepository {
    store: Arc<StoreClient>,
}

impl StoreNewsRepository {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct NewsRow {
    id: i64,
    title: String,
    content: String,
    created_by: i64,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<NewsRow> for NewsItem {
    fn from(row: NewsRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewNewsRow {
    title: String,
    content: String,
    created_by: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct NewsPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl NewsRepository for StoreNewsRepository {
    async fn insert(&self, item: NewNewsItem) -> Result<NewsItem, StoreError> {
        let row = NewNewsRow {
            title: item.title,
            content: item.content,
            created_by: item.created_by,
            created_at: item.created_at,
            updated_at: item.updated_at,
        };
        let stored: NewsRow = self.store.insert(TABLE, &row).await?;
        Ok(stored.into())
    }

    async fn list(&self) -> Result<Vec<NewsItem>, StoreError> {
        let rows: Vec<NewsRow> = self
            .store
            .select(TABLE, TableQuery::new().order_desc("created_at"))
            .await?;
        Ok(rows.into_iter().map(NewsItem::from).collect())
    }

    async fn latest(&self, limit: u32) -> Result<Vec<NewsItem>, StoreError> {
        let rows: Vec<NewsRow> = self
            .store
            .select(
                TABLE,
                TableQuery::new().order_desc("created_at").limit(limit),
            )
            .await?;
        Ok(rows.into_iter().map(NewsItem::from).collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: NewsPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<NewsItem>, StoreError> {
        let patch_row = NewsPatchRow {
            title: patch.title,
            content: patch.content,
            updated_at,
        };
        let mut rows: Vec<NewsRow> = self
            .store
            .update(TABLE, TableQuery::new().eq("id", id), &patch_row)
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0).into())
        })
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let removed = self
            .store
            .delete(TABLE, TableQuery::new().eq("id", id))
            .await?;
        Ok(removed > 0)
    }
}
