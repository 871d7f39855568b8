//! Port abstraction for staff-account persistence adapters.

use async_trait::async_trait;

use crate::domain::admin::{Admin, AdminAccount, AdminPatch, NewAdmin};
use crate::domain::ports::StoreError;

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Create a staff account and return the stored record.
    async fn insert(&self, admin: NewAdmin) -> Result<Admin, StoreError>;

    /// All staff accounts, highest id first.
    async fn list(&self) -> Result<Vec<Admin>, StoreError>;

    /// Apply a partial update; `None` when the id is unknown.
    async fn update(&self, id: i64, patch: AdminPatch) -> Result<Option<Admin>, StoreError>;

    /// Delete by id; `false` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Credential row for the login flow.
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>, StoreError>;

    /// The account holding the super-admin role, if any.
    async fn find_super_admin(&self) -> Result<Option<Admin>, StoreError>;
}
