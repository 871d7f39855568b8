//! Store adapter for the `admins` table.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::admin::{Admin, AdminAccount, AdminPatch, AdminRole, NewAdmin};
use crate::domain::ports::{AdminRepository, StoreError};
use crate::domain::student::AccountStatus;
use crate::outbound::store::client::{StoreClient, TableQuery};

const TABLE: &str = "admins";
const LIST_COLUMNS: &str = "id, name, email, role, status";

pub struct StoreAdminRepository {
    store: Arc<StoreClient>,
}

impl StoreAdminRepository {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct AdminRow {
    id: i64,
    name: String,
    email: String,
    #[serde(default)]
    contact: Option<String>,
    role: AdminRole,
    status: AccountStatus,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            contact: row.contact,
            role: row.role,
            status: row.status,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewAdminRow {
    name: String,
    email: String,
    password: String,
    role: AdminRole,
    status: AccountStatus,
}

#[derive(Debug, Serialize)]
struct AdminPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<AdminRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<AccountStatus>,
}

#[derive(Debug, Deserialize)]
struct AccountRow {
    id: i64,
    email: String,
    password: String,
    role: AdminRole,
    status: AccountStatus,
}

#[async_trait]
impl AdminRepository for StoreAdminRepository {
    async fn insert(&self, admin: NewAdmin) -> Result<Admin, StoreError> {
        let row = NewAdminRow {
            name: admin.name,
            email: admin.email,
            password: admin.password_digest,
            role: admin.role,
            status: admin.status,
        };
        let stored: AdminRow = self.store.insert(TABLE, &row).await?;
        Ok(stored.into())
    }

    async fn list(&self) -> Result<Vec<Admin>, StoreError> {
        let rows: Vec<AdminRow> = self
            .store
            .select(
                TABLE,
                TableQuery::new().select(LIST_COLUMNS).order_desc("id"),
            )
            .await?;
        Ok(rows.into_iter().map(Admin::from).collect())
    }

    async fn update(&self, id: i64, patch: AdminPatch) -> Result<Option<Admin>, StoreError> {
        let patch_row = AdminPatchRow {
            name: patch.name,
            email: patch.email,
            password: patch.password_digest,
            contact: patch.contact,
            role: patch.role,
            status: patch.status,
        };
        let mut rows: Vec<AdminRow> = self
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

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>, StoreError> {
        let mut rows: Vec<AccountRow> = self
            .store
            .select(TABLE, TableQuery::new().eq("email", email))
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            let row = rows.swap_remove(0);
            Some(AdminAccount {
                id: row.id,
                email: row.email,
                password_digest: row.password,
                role: row.role,
                status: row.status,
            })
        })
    }

    async fn find_super_admin(&self) -> Result<Option<Admin>, StoreError> {
        let mut rows: Vec<AdminRow> = self
            .store
            .select(TABLE, TableQuery::new().eq("role", "super_admin"))
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.swap_remove(0).into())
        })
    }
}
