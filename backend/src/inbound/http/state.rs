//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O. Services are assembled
//! per call from the shared `Arc`s; construction is a handful of pointer
//! clones.

use std::sync::Arc;

use crate::domain::chat_service::ChatService;
use crate::domain::dashboard::DashboardService;
use crate::domain::escalation::EscalationService;
use crate::domain::login::{AdminLoginService, StudentLoginService};
use crate::domain::ports::{
    AdminRepository, ChatLogRepository, Clock, FaqRepository, NewsRepository, PasswordHasher,
    StudentRepository, TokenCodec, UnsolvedQueryRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub faqs: Arc<dyn FaqRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub students: Arc<dyn StudentRepository>,
    pub admins: Arc<dyn AdminRepository>,
    pub chat_logs: Arc<dyn ChatLogRepository>,
    pub unsolved: Arc<dyn UnsolvedQueryRepository>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenCodec>,
    pub clock: Arc<dyn Clock>,
    /// Student tokens expire after this interval.
    pub student_token_ttl: chrono::Duration,
    /// Admin and super-admin tokens expire after this interval.
    pub admin_token_ttl: chrono::Duration,
}

impl HttpState {
    /// The chatbot resolution workflow.
    pub fn chat_service(&self) -> ChatService {
        ChatService::new(
            Arc::clone(&self.faqs),
            Arc::clone(&self.chat_logs),
            Arc::clone(&self.unsolved),
            Arc::clone(&self.clock),
        )
    }

    /// The admin-side escalation resolver.
    pub fn escalation_service(&self) -> EscalationService {
        EscalationService::new(
            Arc::clone(&self.unsolved),
            Arc::clone(&self.faqs),
            Arc::clone(&self.chat_logs),
            Arc::clone(&self.clock),
        )
    }

    /// Dashboard aggregates.
    pub fn dashboard_service(&self) -> DashboardService {
        DashboardService::new(
            Arc::clone(&self.students),
            Arc::clone(&self.faqs),
            Arc::clone(&self.unsolved),
        )
    }

    /// Student login flow.
    pub fn student_login(&self) -> StudentLoginService {
        StudentLoginService::new(
            Arc::clone(&self.students),
            Arc::clone(&self.hasher),
            Arc::clone(&self.tokens),
            self.student_token_ttl,
        )
    }

    /// Admin and super-admin login flow.
    pub fn admin_login(&self) -> AdminLoginService {
        AdminLoginService::new(
            Arc::clone(&self.admins),
            Arc::clone(&self.hasher),
            Arc::clone(&self.tokens),
            self.admin_token_ttl,
        )
    }
}
