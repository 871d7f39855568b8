//! Port abstraction for FAQ persistence adapters.

use async_trait::async_trait;

use crate::domain::faq::{Faq, FaqCandidate, FaqPatch, FaqStatus, NewFaq};
use crate::domain::ports::StoreError;

#[async_trait]
pub trait FaqRepository: Send + Sync {
    /// Insert a FAQ and return the stored row.
    async fn insert(&self, faq: NewFaq) -> Result<Faq, StoreError>;

    /// All FAQs, newest first.
    async fn list(&self) -> Result<Vec<Faq>, StoreError>;

    /// The matcher's working set, in store iteration order (no explicit
    /// ordering is requested, deliberately).
    async fn match_candidates(&self) -> Result<Vec<FaqCandidate>, StoreError>;

    /// Apply a partial update, stamping `updated_at`; `None` when the id is
    /// unknown.
    async fn update(
        &self,
        id: i64,
        patch: FaqPatch,
        updated_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<Faq>, StoreError>;

    /// Delete by id; `false` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Total number of FAQs.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Number of FAQs in the given status.
    async fn count_by_status(&self, status: FaqStatus) -> Result<u64, StoreError>;
}
