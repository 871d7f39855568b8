//! Store adapter for the `unsolved_queries` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{StoreError, UnsolvedQueryRepository};
use crate::domain::unsolved::{NewUnsolvedQuery, UnsolvedQuery};
use crate::outbound::store::client::{StoreClient, TableQuery};

const TABLE: &str = "unsolved_queries";

pub struct StoreUnsolvedQueryRepository {
    store: Arc<StoreClient>,
}

impl StoreUnsolvedQueryRepository {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct UnsolvedRow {
    id: i64,
    student_id: i64,
    query_text: String,
    created_at: DateTime<Utc>,
    reviewed: bool,
    #[serde(default)]
    chat_log_id: Option<i64>,
}

impl From<UnsolvedRow> for UnsolvedQuery {
    fn from(row: UnsolvedRow) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            query_text: row.query_text,
            created_at: row.created_at,
            reviewed: row.reviewed,
            chat_log_id: row.chat_log_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewUnsolvedRow {
    student_id: i64,
    query_text: String,
    created_at: DateTime<Utc>,
    reviewed: bool,
}

#[derive(Debug, Serialize)]
struct LinkRow {
    chat_log_id: i64,
}

#[derive(Debug, Serialize)]
struct ReviewedRow {
    reviewed: bool,
}

#[async_trait]
impl UnsolvedQueryRepository for StoreUnsolvedQueryRepository {
    async fn insert(&self, query: NewUnsolvedQuery) -> Result<UnsolvedQuery, StoreError> {
        let row = NewUnsolvedRow {
            student_id: query.student_id,
            query_text: query.query_text,
            created_at: query.created_at,
            reviewed: query.reviewed,
        };
        let stored: UnsolvedRow = self.store.insert(TABLE, &row).await?;
        Ok(stored.into())
    }

    async fn link_chat_log(&self, id: i64, chat_log_id: i64) -> Result<(), StoreError> {
        let _: Vec<UnsolvedRow> = self
            .store
            .update(TABLE, TableQuery::new().eq("id", id), &LinkRow { chat_log_id })
            .await?;
        Ok(())
    }

    async fn list_unreviewed(&self) -> Result<Vec<UnsolvedQuery>, StoreError> {
        let rows: Vec<UnsolvedRow> = self
            .store
            .select(
                TABLE,
                TableQuery::new()
                    .eq("reviewed", false)
                    .order_desc("created_at"),
            )
            .await?;
        Ok(rows.into_iter().map(UnsolvedQuery::from).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<UnsolvedQuery>, StoreError> {
        let mut rows: Vec<UnsolvedRow> = self
            .store
            .select(TABLE, TableQuery::new().eq("id", id))
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0).into())
        })
    }

    async fn set_reviewed(&self, id: i64, reviewed: bool) -> Result<(), StoreError> {
        let _: Vec<UnsolvedRow> = self
            .store
            .update(TABLE, TableQuery::new().eq("id", id), &ReviewedRow { reviewed })
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let removed = self
            .store
            .delete(TABLE, TableQuery::new().eq("id", id))
            .await?;
        Ok(removed > 0)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.store.count(TABLE, TableQuery::new()).await
    }
}
