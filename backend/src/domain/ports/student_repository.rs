//! Port abstraction for student persistence adapters.

use async_trait::async_trait;

use crate::domain::student::{NewStudent, Student, StudentAccount, StudentPatch, StudentProfile};
use crate::domain::ports::StoreError;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Register a student and return the stored record (digest excluded).
    async fn insert(&self, student: NewStudent) -> Result<Student, StoreError>;

    /// All students, highest id first, digest excluded.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    /// Apply a partial update; `None` when the id is unknown.
    async fn update(&self, id: i64, patch: StudentPatch) -> Result<Option<Student>, StoreError>;

    /// Delete by id; `false` when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Credential row for the login flow.
    async fn find_by_email(&self, email: &str) -> Result<Option<StudentAccount>, StoreError>;

    /// Profile slice for the home screen.
    async fn find_profile(&self, id: i64) -> Result<Option<StudentProfile>, StoreError>;

    /// Total number of students.
    async fn count(&self) -> Result<u64, StoreError>;
}
