//! Adapters for the hosted tabular store, one per table, sharing a single
//! HTTP client.

pub mod admins;
pub mod chat_logs;
pub mod client;
pub mod faqs;
pub mod news;
pub mod students;
pub mod unsolved;

pub use self::admins::StoreAdminRepository;
pub use self::chat_logs::StoreChatLogRepository;
pub use self::client::{StoreClient, TableQuery};
pub use self::faqs::StoreFaqRepository;
pub use self::news::StoreNewsRepository;
pub use self::students::StoreStudentRepository;
pub use self::unsolved::StoreUnsolvedQueryRepository;
