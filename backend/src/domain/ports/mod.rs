//! Driving and driven ports.
//!
//! Repositories are the seams to the external tabular store; the credential
//! ports wrap the opaque digest and signed-claims codec; the clock keeps
//! timestamping injectable. Inbound adapters depend only on these traits.

pub mod admin_repository;
pub mod chat_log_repository;
pub mod clock;
pub mod credentials;
pub mod faq_repository;
pub mod news_repository;
pub mod store;
pub mod student_repository;
pub mod unsolved_query_repository;

pub use self::admin_repository::AdminRepository;
pub use self::chat_log_repository::ChatLogRepository;
pub use self::clock::{Clock, SystemClock};
pub use self::credentials::{CredentialError, PasswordHasher, TokenCodec};
pub use self::faq_repository::FaqRepository;
pub use self::news_repository::NewsRepository;
pub use self::store::StoreError;
pub use self::student_repository::StudentRepository;
pub use self::unsolved_query_repository::UnsolvedQueryRepository;
