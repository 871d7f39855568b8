//! Store adapter for the `faqs` table.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::faq::{Faq, FaqCandidate, FaqPatch, FaqSource, FaqStatus, NewFaq};
use crate::domain::ports::{FaqRepository, StoreError};
use crate::outbound::store::client::{StoreClient, TableQuery};

const TABLE: &str = "faqs";

pub struct StoreFaqRepository {
    store: Arc<StoreClient>,
}

impl StoreFaqRepository {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct FaqRow {
    id: i64,
    question: String,
    answer: String,
    source_type: FaqSource,
    #[serde(default)]
    source_file: Option<String>,
    created_by: i64,
    status: FaqStatus,
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl From<FaqRow> for Faq {
    fn from(row: FaqRow) -> Self {
        Self {
            id: row.id,
            question: row.question,
            answer: row.answer,
            source_type: row.source_type,
            source_file: row.source_file,
            created_by: row.created_by,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewFaqRow {
    question: String,
    answer: String,
    source_type: FaqSource,
    source_file: Option<String>,
    created_by: i64,
    status: FaqStatus,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<NewFaq> for NewFaqRow {
    fn from(faq: NewFaq) -> Self {
        Self {
            question: faq.question,
            answer: faq.answer,
            source_type: faq.source_type,
            source_file: faq.source_file,
            created_by: faq.created_by,
            status: faq.status,
            created_at: faq.created_at,
            updated_at: faq.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct FaqPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<FaqStatus>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CandidateRow {
    id: i64,
    question: String,
    answer: String,
}

fn status_param(status: FaqStatus) -> &'static str {
    match status {
        FaqStatus::Pending => "pending",
        FaqStatus::Solved => "solved",
        FaqStatus::Unsolved => "unsolved",
    }
}

#[async_trait]
impl FaqRepository for StoreFaqRepository {
    async fn insert(&self, faq: NewFaq) -> Result<Faq, StoreError> {
        let row: FaqRow = self.store.insert(TABLE, &NewFaqRow::from(faq)).await?;
        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Faq>, StoreError> {
        let rows: Vec<FaqRow> = self
            .store
            .select(TABLE, TableQuery::new().order_desc("created_at"))
            .await?;
        Ok(rows.into_iter().map(Faq::from).collect())
    }

    async fn match_candidates(&self) -> Result<Vec<FaqCandidate>, StoreError> {
        let rows: Vec<CandidateRow> = self
            .store
            .select(TABLE, TableQuery::new().select("id, question, answer"))
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| FaqCandidate {
                id: row.id,
                question: row.question,
                answer: row.answer,
            })
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: FaqPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Faq>, StoreError> {
        let patch_row = FaqPatchRow {
            question: patch.question,
            answer: patch.answer,
            status: patch.status,
            updated_at,
        };
        let mut rows: Vec<FaqRow> = self
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

    async fn count(&self) -> Result<u64, StoreError> {
        self.store.count(TABLE, TableQuery::new()).await
    }

    async fn count_by_status(&self, status: FaqStatus) -> Result<u64, StoreError> {
        self.store
            .count(TABLE, TableQuery::new().eq("status", status_param(status)))
            .await
    }
}
