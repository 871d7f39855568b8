//! Store adapter for the `students` table.
//!
//! Listing and update replies never select the password column; the digest
//! only travels through the dedicated credential lookup.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{StoreError, StudentRepository};
use crate::domain::student::{
    AccountStatus, NewStudent, Student, StudentAccount, StudentPatch, StudentProfile,
};
use crate::outbound::store::client::{StoreClient, TableQuery};

const TABLE: &str = "students";
const PUBLIC_COLUMNS: &str = "id, name, email, department, enrollment_no, role, status";

pub struct StoreStudentRepository {
    store: Arc<StoreClient>,
}

impl StoreStudentRepository {
    pub fn new(store: Arc<StoreClient>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize)]
struct StudentRow {
    id: i64,
    name: String,
    email: String,
    department: String,
    enrollment_no: String,
    role: String,
    status: AccountStatus,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            department: row.department,
            enrollment_no: row.enrollment_no,
            role: row.role,
            status: row.status,
        }
    }
}

#[derive(Debug, Serialize)]
struct NewStudentRow {
    name: String,
    email: String,
    password: String,
    department: String,
    enrollment_no: String,
    role: &'static str,
    status: AccountStatus,
}

#[derive(Debug, Serialize)]
struct StudentPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enrollment_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<AccountStatus>,
}

#[derive(Debug, Deserialize)]
struct AccountRow {
    id: i64,
    email: String,
    password: String,
    status: AccountStatus,
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    name: String,
    department: String,
    enrollment_no: String,
}

#[async_trait]
impl StudentRepository for StoreStudentRepository {
    async fn insert(&self, student: NewStudent) -> Result<Student, StoreError> {
        let row = NewStudentRow {
            name: student.name,
            email: student.email,
            password: student.password_digest,
            department: student.department,
            enrollment_no: student.enrollment_no,
            role: "student",
            status: AccountStatus::Active,
        };
        let stored: StudentRow = self.store.insert(TABLE, &row).await?;
        Ok(stored.into())
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let rows: Vec<StudentRow> = self
            .store
            .select(
                TABLE,
                TableQuery::new().select(PUBLIC_COLUMNS).order_desc("id"),
            )
            .await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn update(&self, id: i64, patch: StudentPatch) -> Result<Option<Student>, StoreError> {
        let patch_row = StudentPatchRow {
            name: patch.name,
            email: patch.email,
            password: patch.password_digest,
            department: patch.department,
            enrollment_no: patch.enrollment_no,
            status: patch.status,
        };
        let mut rows: Vec<StudentRow> = self
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

    async fn find_by_email(&self, email: &str) -> Result<Option<StudentAccount>, StoreError> {
        let mut rows: Vec<AccountRow> = self
            .store
            .select(TABLE, TableQuery::new().eq("email", email))
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            let row = rows.swap_remove(0);
            Some(StudentAccount {
                id: row.id,
                email: row.email,
                password_digest: row.password,
                status: row.status,
            })
        })
    }

    async fn find_profile(&self, id: i64) -> Result<Option<StudentProfile>, StoreError> {
        let mut rows: Vec<ProfileRow> = self
            .store
            .select(
                TABLE,
                TableQuery::new()
                    .select("name, department, enrollment_no")
                    .eq("id", id),
            )
            .await?;
        Ok(if rows.is_empty() {
            None
        } else {
            let row = rows.swap_remove(0);
            Some(StudentProfile {
                name: row.name,
                department: row.department,
                enrollment_no: row.enrollment_no,
            })
        })
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.store.count(TABLE, TableQuery::new()).await
    }
}
