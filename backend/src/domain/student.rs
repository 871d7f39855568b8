//! Student identity records.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Whether an account may log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// A student as exposed to the admin surface; the password digest never
/// leaves the store adapter in this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub department: String,
    pub enrollment_no: String,
    pub role: String,
    pub status: AccountStatus,
}

/// Fields required to register a student. `password_digest` is the one-way
/// digest of the submitted password; the role is always `student` and the
/// account starts active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub department: String,
    pub enrollment_no: String,
}

/// Partial update: only present fields are written back. A patched password
/// arrives here already digested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_digest: Option<String>,
    pub department: Option<String>,
    pub enrollment_no: Option<String>,
    pub status: Option<AccountStatus>,
}

impl StudentPatch {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password_digest.is_none()
            && self.department.is_none()
            && self.enrollment_no.is_none()
            && self.status.is_none()
    }
}

/// Credential row used only by the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentAccount {
    pub id: i64,
    pub email: String,
    pub password_digest: String,
    pub status: AccountStatus,
}

/// The profile slice rendered on the student home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    pub name: String,
    pub department: String,
    pub enrollment_no: String,
}
