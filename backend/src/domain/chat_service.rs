//! Query resolution workflow.
//!
//! One incoming student question either resolves against an existing FAQ or
//! lands in the review queue; either way the interaction is logged. Side
//! effects happen in a fixed order so failures leave a predictable prefix:
//! queue insert, then log insert, then the queue-to-log link.

use std::sync::Arc;

use tracing::debug;

use crate::domain::chat::{ChatPrompt, ChatReply, ChatStatus, NewChatLogEntry};
use crate::domain::matcher;
use crate::domain::ports::{Clock, ChatLogRepository, FaqRepository, UnsolvedQueryRepository};
use crate::domain::unsolved::NewUnsolvedQuery;
use crate::domain::DomainError;

/// Reply sent when no FAQ matches. The wording is part of the API surface.
pub const FALLBACK_REPLY: &str =
    "I'm not sure about that yet, but our admin will review your question soon.";

/// Resolves student questions against the FAQ set.
pub struct ChatService {
    faqs: Arc<dyn FaqRepository>,
    chat_logs: Arc<dyn ChatLogRepository>,
    unsolved: Arc<dyn UnsolvedQueryRepository>,
    clock: Arc<dyn Clock>,
}

impl ChatService {
    pub fn new(
        faqs: Arc<dyn FaqRepository>,
        chat_logs: Arc<dyn ChatLogRepository>,
        unsolved: Arc<dyn UnsolvedQueryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            faqs,
            chat_logs,
            unsolved,
            clock,
        }
    }

    /// Run one question through the matcher, log the interaction, and queue
    /// it for review when unmatched.
    pub async fn resolve(&self, prompt: ChatPrompt) -> Result<ChatReply, DomainError> {
        let query_text = prompt.query_text.trim().to_owned();
        if query_text.is_empty() {
            return Err(DomainError::invalid_request("Query text cannot be empty."));
        }

        // Full scan; the store provides no filter pushdown for substring
        // containment and the FAQ set is small.
        let candidates = self.faqs.match_candidates().await?;
        let matched = matcher::first_match(&query_text, &candidates);
        let now = self.clock.now();

        let (bot_response, status, faq_id) = match matched {
            Some(faq) => {
                debug!(faq_id = faq.id, "query matched FAQ");
                (faq.answer.clone(), ChatStatus::Solved, Some(faq.id))
            }
            None => (FALLBACK_REPLY.to_owned(), ChatStatus::Unsolved, None),
        };

        let queued = if matched.is_none() {
            let queued = self
                .unsolved
                .insert(NewUnsolvedQuery {
                    student_id: prompt.student_id,
                    query_text: query_text.clone(),
                    created_at: now,
                    reviewed: false,
                })
                .await?;
            debug!(unsolved_id = queued.id, "query queued for review");
            Some(queued.id)
        } else {
            None
        };

        let entry = self
            .chat_logs
            .insert(NewChatLogEntry {
                student_id: prompt.student_id,
                query_text: query_text.clone(),
                detected_language: prompt.detected_language,
                bot_response: bot_response.clone(),
                faq_id,
                status,
                created_at: now,
            })
            .await?;

        if let Some(unsolved_id) = queued {
            self.unsolved.link_chat_log(unsolved_id, entry.id).await?;
        }

        Ok(ChatReply {
            query_text,
            bot_response,
            status,
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::faq::FaqStatus;
    use crate::test_support::{FixedClock, InMemoryStore};

    fn service(store: &Arc<InMemoryStore>, clock: &Arc<FixedClock>) -> ChatService {
        ChatService::new(
            Arc::clone(store) as Arc<dyn FaqRepository>,
            Arc::clone(store) as Arc<dyn ChatLogRepository>,
            Arc::clone(store) as Arc<dyn UnsolvedQueryRepository>,
            Arc::clone(clock) as Arc<dyn Clock>,
        )
    }

    #[tokio::test]
    async fn matched_prompt_logs_with_faq_id() {
        let store = InMemoryStore::new();
        let clock = FixedClock::default_start();
        let faq = store.seed_faq(
            "What is FastAPI?",
            "A web framework.",
            FaqStatus::Solved,
            clock.now(),
        );

        let reply = service(&store, &clock)
            .resolve(ChatPrompt {
                student_id: 1,
                query_text: "fastapi".to_owned(),
                detected_language: Some("en".to_owned()),
            })
            .await
            .expect("resolution");

        assert_eq!(reply.status, ChatStatus::Solved);
        assert_eq!(reply.bot_response, "A web framework.");
        let logs = store.chat_logs_snapshot();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].faq_id, Some(faq.id));
        assert!(store.unsolved_snapshot().is_empty());
    }

    #[tokio::test]
    async fn unmatched_prompt_queues_logs_and_links() {
        let store = InMemoryStore::new();
        let clock = FixedClock::default_start();

        let reply = service(&store, &clock)
            .resolve(ChatPrompt {
                student_id: 4,
                query_text: "something unanswered".to_owned(),
                detected_language: None,
            })
            .await
            .expect("resolution");

        assert_eq!(reply.status, ChatStatus::Unsolved);
        assert_eq!(reply.bot_response, FALLBACK_REPLY);
        let queue = store.unsolved_snapshot();
        let logs = store.chat_logs_snapshot();
        assert_eq!(queue.len(), 1);
        assert_eq!(logs.len(), 1);
        assert_eq!(queue[0].chat_log_id, Some(logs[0].id));
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected_without_store_calls() {
        let store = InMemoryStore::new();
        let clock = FixedClock::default_start();
        store.fail_once("faqs.match_candidates");

        let err = service(&store, &clock)
            .resolve(ChatPrompt {
                student_id: 1,
                query_text: "   ".to_owned(),
                detected_language: None,
            })
            .await
            .expect_err("blank prompt");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
    }
}
