//! In-memory store, fixed clock, and state builder for tests.
//!
//! One [`InMemoryStore`] implements every repository port over mutexed
//! vectors, mirroring the hosted store's observable semantics: assigned ids,
//! the same orderings, and representation-style update/delete results. Named
//! operations can be primed to fail once, which is how the escalation saga
//! tests force mid-sequence store errors.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::admin::{Admin, AdminAccount, AdminPatch, AdminRole, NewAdmin};
use crate::domain::chat::{ChatBackfill, ChatLogEntry, ChatStatus, NewChatLogEntry};
use crate::domain::faq::{Faq, FaqCandidate, FaqPatch, FaqStatus, NewFaq};
use crate::domain::news::{NewNewsItem, NewsItem, NewsPatch};
use crate::domain::ports::{
    AdminRepository, ChatLogRepository, Clock, FaqRepository, NewsRepository, StoreError,
    StudentRepository, UnsolvedQueryRepository,
};
use crate::domain::student::{
    AccountStatus, NewStudent, Student, StudentAccount, StudentPatch, StudentProfile,
};
use crate::domain::unsolved::{NewUnsolvedQuery, UnsolvedQuery};
use crate::inbound::http::HttpState;
use crate::outbound::{Sha256PasswordHasher, SignedTokenCodec};

/// Clock pinned to an instant, advanced explicitly by tests.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    /// A clock starting at a fixed, readable instant.
    pub fn default_start() -> Arc<Self> {
        Self::at(
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                .single()
                .expect("valid instant"),
        )
    }

    pub fn at(start: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(start),
        })
    }

    /// Move the clock forward.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

#[derive(Clone)]
struct StudentRecord {
    student: Student,
    password_digest: String,
}

#[derive(Clone)]
struct AdminRecord {
    admin: Admin,
    password_digest: String,
}

#[derive(Default)]
struct StoreState {
    faqs: Vec<Faq>,
    news: Vec<NewsItem>,
    students: Vec<StudentRecord>,
    admins: Vec<AdminRecord>,
    chat_logs: Vec<ChatLogEntry>,
    unsolved: Vec<UnsolvedQuery>,
    next_id: i64,
}

impl StoreState {
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory double for the hosted tabular store.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    failures: Mutex<HashSet<&'static str>>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Prime the named operation to fail exactly once with a store error.
    /// Operation names follow `table.verb`, e.g. `chat_logs.backfill`.
    pub fn fail_once(&self, op: &'static str) {
        self.failures.lock().expect("failure lock").insert(op);
    }

    fn check(&self, op: &'static str) -> Result<(), StoreError> {
        if self.failures.lock().expect("failure lock").remove(op) {
            return Err(StoreError::query(format!("injected failure: {op}")));
        }
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().expect("store lock")
    }

    // Seeding helpers: rows enter with the same defaults the real handlers
    // would produce, and tests read the returned value for assertions.

    pub fn seed_faq(
        &self,
        question: &str,
        answer: &str,
        status: FaqStatus,
        created_at: DateTime<Utc>,
    ) -> Faq {
        let mut state = self.lock();
        let id = state.assign_id();
        let faq = Faq {
            id,
            question: question.to_owned(),
            answer: answer.to_owned(),
            source_type: crate::domain::faq::FaqSource::Manual,
            source_file: None,
            created_by: 1,
            status,
            created_at,
            updated_at: Some(created_at),
        };
        state.faqs.push(faq.clone());
        faq
    }

    pub fn seed_news(&self, title: &str, content: &str, created_at: DateTime<Utc>) -> NewsItem {
        let mut state = self.lock();
        let id = state.assign_id();
        let item = NewsItem {
            id,
            title: title.to_owned(),
            content: content.to_owned(),
            created_by: 1,
            created_at,
            updated_at: Some(created_at),
        };
        state.news.push(item.clone());
        item
    }

    pub fn seed_student(
        &self,
        name: &str,
        email: &str,
        password_digest: &str,
        status: AccountStatus,
    ) -> Student {
        let mut state = self.lock();
        let id = state.assign_id();
        let student = Student {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            department: "Computer Science".to_owned(),
            enrollment_no: format!("EN{id:04}"),
            role: "student".to_owned(),
            status,
        };
        state.students.push(StudentRecord {
            student: student.clone(),
            password_digest: password_digest.to_owned(),
        });
        student
    }

    pub fn seed_admin(
        &self,
        name: &str,
        email: &str,
        password_digest: &str,
        role: AdminRole,
        status: AccountStatus,
    ) -> Admin {
        let mut state = self.lock();
        let id = state.assign_id();
        let admin = Admin {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
            contact: None,
            role,
            status,
        };
        state.admins.push(AdminRecord {
            admin: admin.clone(),
            password_digest: password_digest.to_owned(),
        });
        admin
    }

    pub fn seed_unsolved(
        &self,
        student_id: i64,
        query_text: &str,
        created_at: DateTime<Utc>,
    ) -> UnsolvedQuery {
        let mut state = self.lock();
        let id = state.assign_id();
        let query = UnsolvedQuery {
            id,
            student_id,
            query_text: query_text.to_owned(),
            created_at,
            reviewed: false,
            chat_log_id: None,
        };
        state.unsolved.push(query.clone());
        query
    }

    pub fn seed_chat_log(
        &self,
        student_id: i64,
        query_text: &str,
        bot_response: &str,
        status: ChatStatus,
        created_at: DateTime<Utc>,
    ) -> ChatLogEntry {
        let mut state = self.lock();
        let id = state.assign_id();
        let entry = ChatLogEntry {
            id,
            student_id,
            query_text: query_text.to_owned(),
            detected_language: Some("en".to_owned()),
            bot_response: bot_response.to_owned(),
            faq_id: None,
            status,
            created_at,
            updated_at: None,
        };
        state.chat_logs.push(entry.clone());
        entry
    }

    // Snapshots for assertions.

    pub fn faqs_snapshot(&self) -> Vec<Faq> {
        self.lock().faqs.clone()
    }

    pub fn chat_logs_snapshot(&self) -> Vec<ChatLogEntry> {
        self.lock().chat_logs.clone()
    }

    pub fn unsolved_snapshot(&self) -> Vec<UnsolvedQuery> {
        self.lock().unsolved.clone()
    }

    pub fn students_snapshot(&self) -> Vec<Student> {
        self.lock()
            .students
            .iter()
            .map(|record| record.student.clone())
            .collect()
    }
}

#[async_trait]
impl FaqRepository for InMemoryStore {
    async fn insert(&self, faq: NewFaq) -> Result<Faq, StoreError> {
        self.check("faqs.insert")?;
        let mut state = self.lock();
        let id = state.assign_id();
        let stored = Faq {
            id,
            question: faq.question,
            answer: faq.answer,
            source_type: faq.source_type,
            source_file: faq.source_file,
            created_by: faq.created_by,
            status: faq.status,
            created_at: faq.created_at,
            updated_at: faq.updated_at,
        };
        state.faqs.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Faq>, StoreError> {
        self.check("faqs.list")?;
        let mut faqs = self.lock().faqs.clone();
        faqs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(faqs)
    }

    async fn match_candidates(&self) -> Result<Vec<FaqCandidate>, StoreError> {
        self.check("faqs.match_candidates")?;
        Ok(self
            .lock()
            .faqs
            .iter()
            .map(|faq| FaqCandidate {
                id: faq.id,
                question: faq.question.clone(),
                answer: faq.answer.clone(),
            })
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        patch: FaqPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Faq>, StoreError> {
        self.check("faqs.update")?;
        let mut state = self.lock();
        let Some(faq) = state.faqs.iter_mut().find(|faq| faq.id == id) else {
            return Ok(None);
        };
        if let Some(question) = patch.question {
            faq.question = question;
        }
        if let Some(answer) = patch.answer {
            faq.answer = answer;
        }
        if let Some(status) = patch.status {
            faq.status = status;
        }
        faq.updated_at = Some(updated_at);
        Ok(Some(faq.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check("faqs.delete")?;
        let mut state = self.lock();
        let before = state.faqs.len();
        state.faqs.retain(|faq| faq.id != id);
        Ok(state.faqs.len() < before)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.check("faqs.count")?;
        Ok(self.lock().faqs.len() as u64)
    }

    async fn count_by_status(&self, status: FaqStatus) -> Result<u64, StoreError> {
        self.check("faqs.count_by_status")?;
        Ok(self
            .lock()
            .faqs
            .iter()
            .filter(|faq| faq.status == status)
            .count() as u64)
    }
}

#[async_trait]
impl NewsRepository for InMemoryStore {
    async fn insert(&self, item: NewNewsItem) -> Result<NewsItem, StoreError> {
        self.check("news.insert")?;
        let mut state = self.lock();
        let id = state.assign_id();
        let stored = NewsItem {
            id,
            title: item.title,
            content: item.content,
            created_by: item.created_by,
            created_at: item.created_at,
            updated_at: item.updated_at,
        };
        state.news.push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<NewsItem>, StoreError> {
        self.check("news.list")?;
        let mut news = self.lock().news.clone();
        news.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(news)
    }

    async fn latest(&self, limit: u32) -> Result<Vec<NewsItem>, StoreError> {
        let mut news = NewsRepository::list(self).await?;
        news.truncate(limit as usize);
        Ok(news)
    }

    async fn update(
        &self,
        id: i64,
        patch: NewsPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<NewsItem>, StoreError> {
        self.check("news.update")?;
        let mut state = self.lock();
        let Some(item) = state.news.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(content) = patch.content {
            item.content = content;
        }
        item.updated_at = Some(updated_at);
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check("news.delete")?;
        let mut state = self.lock();
        let before = state.news.len();
        state.news.retain(|item| item.id != id);
        Ok(state.news.len() < before)
    }
}

#[async_trait]
impl StudentRepository for InMemoryStore {
    async fn insert(&self, student: NewStudent) -> Result<Student, StoreError> {
        self.check("students.insert")?;
        let mut state = self.lock();
        let id = state.assign_id();
        let stored = Student {
            id,
            name: student.name,
            email: student.email,
            department: student.department,
            enrollment_no: student.enrollment_no,
            role: "student".to_owned(),
            status: AccountStatus::Active,
        };
        state.students.push(StudentRecord {
            student: stored.clone(),
            password_digest: student.password_digest,
        });
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        self.check("students.list")?;
        let mut students = self.students_snapshot();
        students.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(students)
    }

    async fn update(&self, id: i64, patch: StudentPatch) -> Result<Option<Student>, StoreError> {
        self.check("students.update")?;
        let mut state = self.lock();
        let Some(record) = state
            .students
            .iter_mut()
            .find(|record| record.student.id == id)
        else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            record.student.name = name;
        }
        if let Some(email) = patch.email {
            record.student.email = email;
        }
        if let Some(digest) = patch.password_digest {
            record.password_digest = digest;
        }
        if let Some(department) = patch.department {
            record.student.department = department;
        }
        if let Some(enrollment_no) = patch.enrollment_no {
            record.student.enrollment_no = enrollment_no;
        }
        if let Some(status) = patch.status {
            record.student.status = status;
        }
        Ok(Some(record.student.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check("students.delete")?;
        let mut state = self.lock();
        let before = state.students.len();
        state.students.retain(|record| record.student.id != id);
        Ok(state.students.len() < before)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StudentAccount>, StoreError> {
        self.check("students.find_by_email")?;
        Ok(self
            .lock()
            .students
            .iter()
            .find(|record| record.student.email == email)
            .map(|record| StudentAccount {
                id: record.student.id,
                email: record.student.email.clone(),
                password_digest: record.password_digest.clone(),
                status: record.student.status,
            }))
    }

    async fn find_profile(&self, id: i64) -> Result<Option<StudentProfile>, StoreError> {
        self.check("students.find_profile")?;
        Ok(self
            .lock()
            .students
            .iter()
            .find(|record| record.student.id == id)
            .map(|record| StudentProfile {
                name: record.student.name.clone(),
                department: record.student.department.clone(),
                enrollment_no: record.student.enrollment_no.clone(),
            }))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.check("students.count")?;
        Ok(self.lock().students.len() as u64)
    }
}

#[async_trait]
impl AdminRepository for InMemoryStore {
    async fn insert(&self, admin: NewAdmin) -> Result<Admin, StoreError> {
        self.check("admins.insert")?;
        let mut state = self.lock();
        let id = state.assign_id();
        let stored = Admin {
            id,
            name: admin.name,
            email: admin.email,
            contact: None,
            role: admin.role,
            status: admin.status,
        };
        state.admins.push(AdminRecord {
            admin: stored.clone(),
            password_digest: admin.password_digest,
        });
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<Admin>, StoreError> {
        self.check("admins.list")?;
        let mut admins: Vec<Admin> = self
            .lock()
            .admins
            .iter()
            .map(|record| {
                let mut admin = record.admin.clone();
                // The listing never selects the contact column.
                admin.contact = None;
                admin
            })
            .collect();
        admins.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(admins)
    }

    async fn update(&self, id: i64, patch: AdminPatch) -> Result<Option<Admin>, StoreError> {
        self.check("admins.update")?;
        let mut state = self.lock();
        let Some(record) = state.admins.iter_mut().find(|record| record.admin.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            record.admin.name = name;
        }
        if let Some(email) = patch.email {
            record.admin.email = email;
        }
        if let Some(digest) = patch.password_digest {
            record.password_digest = digest;
        }
        if let Some(contact) = patch.contact {
            record.admin.contact = Some(contact);
        }
        if let Some(role) = patch.role {
            record.admin.role = role;
        }
        if let Some(status) = patch.status {
            record.admin.status = status;
        }
        Ok(Some(record.admin.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check("admins.delete")?;
        let mut state = self.lock();
        let before = state.admins.len();
        state.admins.retain(|record| record.admin.id != id);
        Ok(state.admins.len() < before)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>, StoreError> {
        self.check("admins.find_by_email")?;
        Ok(self
            .lock()
            .admins
            .iter()
            .find(|record| record.admin.email == email)
            .map(|record| AdminAccount {
                id: record.admin.id,
                email: record.admin.email.clone(),
                password_digest: record.password_digest.clone(),
                role: record.admin.role,
                status: record.admin.status,
            }))
    }

    async fn find_super_admin(&self) -> Result<Option<Admin>, StoreError> {
        self.check("admins.find_super_admin")?;
        Ok(self
            .lock()
            .admins
            .iter()
            .find(|record| record.admin.role == AdminRole::SuperAdmin)
            .map(|record| record.admin.clone()))
    }
}

#[async_trait]
impl ChatLogRepository for InMemoryStore {
    async fn insert(&self, entry: NewChatLogEntry) -> Result<ChatLogEntry, StoreError> {
        self.check("chat_logs.insert")?;
        let mut state = self.lock();
        let id = state.assign_id();
        let stored = ChatLogEntry {
            id,
            student_id: entry.student_id,
            query_text: entry.query_text,
            detected_language: entry.detected_language,
            bot_response: entry.bot_response,
            faq_id: entry.faq_id,
            status: entry.status,
            created_at: entry.created_at,
            updated_at: None,
        };
        state.chat_logs.push(stored.clone());
        Ok(stored)
    }

    async fn find(&self, id: i64) -> Result<Option<ChatLogEntry>, StoreError> {
        self.check("chat_logs.find")?;
        Ok(self
            .lock()
            .chat_logs
            .iter()
            .find(|entry| entry.id == id)
            .cloned())
    }

    async fn history(&self, student_id: i64) -> Result<Vec<ChatLogEntry>, StoreError> {
        self.check("chat_logs.history")?;
        let mut entries: Vec<ChatLogEntry> = self
            .lock()
            .chat_logs
            .iter()
            .filter(|entry| entry.student_id == student_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    async fn find_latest(
        &self,
        student_id: i64,
        query_text: &str,
    ) -> Result<Option<ChatLogEntry>, StoreError> {
        self.check("chat_logs.find_latest")?;
        Ok(self
            .lock()
            .chat_logs
            .iter()
            .filter(|entry| entry.student_id == student_id && entry.query_text == query_text)
            .max_by_key(|entry| (entry.created_at, entry.id))
            .cloned())
    }

    async fn backfill(&self, id: i64, backfill: ChatBackfill) -> Result<bool, StoreError> {
        self.check("chat_logs.backfill")?;
        let mut state = self.lock();
        let Some(entry) = state.chat_logs.iter_mut().find(|entry| entry.id == id) else {
            return Ok(false);
        };
        entry.bot_response = backfill.bot_response;
        entry.status = backfill.status;
        entry.updated_at = backfill.updated_at;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check("chat_logs.delete")?;
        let mut state = self.lock();
        let before = state.chat_logs.len();
        state.chat_logs.retain(|entry| entry.id != id);
        Ok(state.chat_logs.len() < before)
    }
}

#[async_trait]
impl UnsolvedQueryRepository for InMemoryStore {
    async fn insert(&self, query: NewUnsolvedQuery) -> Result<UnsolvedQuery, StoreError> {
        self.check("unsolved.insert")?;
        let mut state = self.lock();
        let id = state.assign_id();
        let stored = UnsolvedQuery {
            id,
            student_id: query.student_id,
            query_text: query.query_text,
            created_at: query.created_at,
            reviewed: query.reviewed,
            chat_log_id: None,
        };
        state.unsolved.push(stored.clone());
        Ok(stored)
    }

    async fn link_chat_log(&self, id: i64, chat_log_id: i64) -> Result<(), StoreError> {
        self.check("unsolved.link_chat_log")?;
        let mut state = self.lock();
        if let Some(query) = state.unsolved.iter_mut().find(|query| query.id == id) {
            query.chat_log_id = Some(chat_log_id);
        }
        Ok(())
    }

    async fn list_unreviewed(&self) -> Result<Vec<UnsolvedQuery>, StoreError> {
        self.check("unsolved.list_unreviewed")?;
        let mut queue: Vec<UnsolvedQuery> = self
            .lock()
            .unsolved
            .iter()
            .filter(|query| !query.reviewed)
            .cloned()
            .collect();
        queue.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(queue)
    }

    async fn find(&self, id: i64) -> Result<Option<UnsolvedQuery>, StoreError> {
        self.check("unsolved.find")?;
        Ok(self
            .lock()
            .unsolved
            .iter()
            .find(|query| query.id == id)
            .cloned())
    }

    async fn set_reviewed(&self, id: i64, reviewed: bool) -> Result<(), StoreError> {
        self.check("unsolved.set_reviewed")?;
        let mut state = self.lock();
        if let Some(query) = state.unsolved.iter_mut().find(|query| query.id == id) {
            query.reviewed = reviewed;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.check("unsolved.delete")?;
        let mut state = self.lock();
        let before = state.unsolved.len();
        state.unsolved.retain(|query| query.id != id);
        Ok(state.unsolved.len() < before)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.check("unsolved.count")?;
        Ok(self.lock().unsolved.len() as u64)
    }
}

/// Shared secret used by the test token codec.
pub const TEST_TOKEN_SECRET: &str = "test-secret";

/// Assemble an [`HttpState`] over the in-memory store with real credential
/// codec implementations and the given clock.
pub fn test_state(store: &Arc<InMemoryStore>, clock: &Arc<FixedClock>) -> HttpState {
    HttpState {
        faqs: Arc::clone(store) as Arc<dyn FaqRepository>,
        news: Arc::clone(store) as Arc<dyn NewsRepository>,
        students: Arc::clone(store) as Arc<dyn StudentRepository>,
        admins: Arc::clone(store) as Arc<dyn AdminRepository>,
        chat_logs: Arc::clone(store) as Arc<dyn ChatLogRepository>,
        unsolved: Arc::clone(store) as Arc<dyn UnsolvedQueryRepository>,
        hasher: Arc::new(Sha256PasswordHasher),
        tokens: Arc::new(SignedTokenCodec::new(
            TEST_TOKEN_SECRET.to_owned(),
            Arc::clone(clock) as Arc<dyn Clock>,
        )),
        clock: Arc::clone(clock) as Arc<dyn Clock>,
        student_token_ttl: chrono::Duration::hours(1),
        admin_token_ttl: chrono::Duration::hours(2),
    }
}
