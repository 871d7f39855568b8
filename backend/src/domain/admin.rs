//! Admin and super-admin identity records.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::student::AccountStatus;

/// Privilege tier for portal staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

/// A staff account. `contact` is only surfaced on the super-admin profile;
/// the password digest stays inside the store adapter and login flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub role: AdminRole,
    pub status: AccountStatus,
}

/// Fields required to create a staff account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub role: AdminRole,
    pub status: AccountStatus,
}

/// Partial update: only present fields are written back. A patched password
/// arrives here already digested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_digest: Option<String>,
    pub contact: Option<String>,
    pub role: Option<AdminRole>,
    pub status: Option<AccountStatus>,
}

impl AdminPatch {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password_digest.is_none()
            && self.contact.is_none()
            && self.role.is_none()
            && self.status.is_none()
    }
}

/// Credential row used only by the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminAccount {
    pub id: i64,
    pub email: String,
    pub password_digest: String,
    pub role: AdminRole,
    pub status: AccountStatus,
}
