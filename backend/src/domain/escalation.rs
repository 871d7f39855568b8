//! Escalation resolver: promotes an unsolved query into a FAQ.
//!
//! The solved path is a sequence of independent store calls with no
//! transaction around them. Each completed step records an undo action; when
//! a later step fails, the recorded steps are compensated in reverse order so
//! a failed escalation leaves the store as it was (apart from the reviewed
//! flag, which is applied unconditionally before the sequence starts).
//!
//! Two concurrent escalations for the same id can still both pass the
//! existence check before either deletes the queue entry and mint duplicate
//! FAQs; the saga bounds what a single failed sequence leaves behind, not
//! cross-request races.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::chat::{ChatBackfill, ChatLogEntry, ChatStatus, NewChatLogEntry};
use crate::domain::faq::{FaqSource, FaqStatus, NewFaq};
use crate::domain::ports::{
    ChatLogRepository, Clock, FaqRepository, StoreError, UnsolvedQueryRepository,
};
use crate::domain::unsolved::{EscalationOutcome, EscalationRequest, UnsolvedQuery};
use crate::domain::DomainError;

/// Placeholder answer when the admin marks a query solved without text.
pub const DEFAULT_ESCALATION_ANSWER: &str = "Answer added by admin";

/// FAQs minted by escalation are attributed to the fixed system admin
/// record, not the acting admin.
const SYSTEM_ADMIN_ID: i64 = 1;

/// Undo actions recorded by the solved path, newest last.
enum CompletedStep {
    FaqInserted { faq_id: i64 },
    ChatPatched { previous: ChatLogEntry },
    ChatInserted { log_id: i64 },
}

/// Applies admin review decisions to queued queries.
pub struct EscalationService {
    unsolved: Arc<dyn UnsolvedQueryRepository>,
    faqs: Arc<dyn FaqRepository>,
    chat_logs: Arc<dyn ChatLogRepository>,
    clock: Arc<dyn Clock>,
}

impl EscalationService {
    pub fn new(
        unsolved: Arc<dyn UnsolvedQueryRepository>,
        faqs: Arc<dyn FaqRepository>,
        chat_logs: Arc<dyn ChatLogRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            unsolved,
            faqs,
            chat_logs,
            clock,
        }
    }

    /// Apply a review decision. The reviewed flag is always written; the
    /// solved path additionally mints a FAQ, backfills the student's chat
    /// history, and removes the queue entry.
    pub async fn resolve(
        &self,
        id: i64,
        request: EscalationRequest,
    ) -> Result<EscalationOutcome, DomainError> {
        let query = self
            .unsolved
            .find(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Query not found"))?;

        self.unsolved.set_reviewed(id, request.reviewed).await?;

        if !request.solved.unwrap_or(false) {
            return Ok(EscalationOutcome::reviewed_only());
        }

        let answer = request
            .answer
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_ESCALATION_ANSWER.to_owned());

        match self.promote(&query, &answer).await {
            Ok(()) => {
                info!(unsolved_id = query.id, "query escalated into FAQ");
                Ok(EscalationOutcome::solved())
            }
            Err((err, completed)) => {
                error!(
                    unsolved_id = query.id,
                    error = %err,
                    "escalation failed mid-sequence; compensating"
                );
                self.compensate(completed).await;
                Err(err.into())
            }
        }
    }

    /// The solved path: FAQ insert, chat backfill, queue delete, in that
    /// order. Returns the completed steps alongside the error on failure.
    async fn promote(
        &self,
        query: &UnsolvedQuery,
        answer: &str,
    ) -> Result<(), (StoreError, Vec<CompletedStep>)> {
        let mut completed = Vec::new();
        let now = self.clock.now();

        let faq = match self
            .faqs
            .insert(NewFaq {
                question: query.query_text.clone(),
                answer: answer.to_owned(),
                source_type: FaqSource::Text,
                source_file: None,
                created_by: SYSTEM_ADMIN_ID,
                status: FaqStatus::Solved,
                created_at: now,
                updated_at: Some(now),
            })
            .await
        {
            Ok(faq) => faq,
            Err(err) => return Err((err, completed)),
        };
        completed.push(CompletedStep::FaqInserted { faq_id: faq.id });

        let target = match self.backfill_target(query).await {
            Ok(target) => target,
            Err(err) => return Err((err, completed)),
        };

        match target {
            Some(previous) => {
                let backfill = ChatBackfill {
                    bot_response: answer.to_owned(),
                    status: ChatStatus::Solved,
                    updated_at: Some(now),
                };
                match self.chat_logs.backfill(previous.id, backfill).await {
                    // A false return means the entry vanished between lookup
                    // and patch; nothing changed, so nothing to undo.
                    Ok(true) => completed.push(CompletedStep::ChatPatched { previous }),
                    Ok(false) => {}
                    Err(err) => return Err((err, completed)),
                }
            }
            None => {
                let inserted = match self
                    .chat_logs
                    .insert(NewChatLogEntry {
                        student_id: query.student_id,
                        query_text: query.query_text.clone(),
                        detected_language: None,
                        bot_response: answer.to_owned(),
                        faq_id: None,
                        status: ChatStatus::Solved,
                        created_at: now,
                    })
                    .await
                {
                    Ok(entry) => entry,
                    Err(err) => return Err((err, completed)),
                };
                completed.push(CompletedStep::ChatInserted {
                    log_id: inserted.id,
                });
            }
        }

        if let Err(err) = self.unsolved.delete(query.id).await {
            return Err((err, completed));
        }
        Ok(())
    }

    /// The chat entry to patch: the linked entry when the queue recorded one,
    /// otherwise the most recent `(student_id, query_text)` match.
    async fn backfill_target(
        &self,
        query: &UnsolvedQuery,
    ) -> Result<Option<ChatLogEntry>, StoreError> {
        if let Some(chat_log_id) = query.chat_log_id {
            if let Some(entry) = self.chat_logs.find(chat_log_id).await? {
                return Ok(Some(entry));
            }
        }
        self.chat_logs
            .find_latest(query.student_id, &query.query_text)
            .await
    }

    /// Undo completed steps in reverse order, best effort. Compensation
    /// failures are logged and swallowed; the original error still surfaces.
    async fn compensate(&self, completed: Vec<CompletedStep>) {
        for step in completed.into_iter().rev() {
            let outcome = match step {
                CompletedStep::FaqInserted { faq_id } => {
                    self.faqs.delete(faq_id).await.map(|_| ())
                }
                CompletedStep::ChatPatched { previous } => {
                    let restore = ChatBackfill {
                        bot_response: previous.bot_response.clone(),
                        status: previous.status,
                        updated_at: previous.updated_at,
                    };
                    self.chat_logs.backfill(previous.id, restore).await.map(|_| ())
                }
                CompletedStep::ChatInserted { log_id } => {
                    self.chat_logs.delete(log_id).await.map(|_| ())
                }
            };
            if let Err(err) = outcome {
                error!(error = %err, "escalation compensation step failed");
            }
        }
    }
}
