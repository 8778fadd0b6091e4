//! # IntakeWorkflow
//!
//! Orchestrates a raw submission into a persisted ticket or a policy
//! rejection. Checks run in a fixed order and short-circuit on the first
//! failure: block → content filter → category → rate limit. Only then is a
//! ticket number issued and the ticket persisted.
//!
//! The rate-limit check, attachment upload, persist, and mark update run
//! under the submitting user's advisory lock, so rapid-fire submissions from
//! one user serialize instead of racing the cooldown window.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use domains::error::{Rejection, Result};
use domains::models::{
    Attachment, AttachmentKind, NewTicket, Ticket, UserId,
};
use domains::ports::{BlockRegistry, ObjectStorage, SessionStore, TicketRepo, TicketSequencer};
use tracing::{debug, info, warn};

use crate::content_filter::{self, Verdict};
use crate::locks::UserLocks;
use crate::moderation::ModerationNotifier;
use crate::rate_limiter::{Gate, RateLimiter};
use crate::ticketing;

/// An inbound submission after the transport stripped its event shape.
#[derive(Debug, Clone)]
pub struct Submission {
    pub user_id: UserId,
    /// Message text or media caption; may be empty for bare media.
    pub text: String,
    pub attachment: Option<IncomingAttachment>,
}

#[derive(Debug, Clone)]
pub struct IncomingAttachment {
    pub kind: AttachmentKind,
    /// The transport's opaque file handle.
    pub file_id: String,
    /// Raw bytes when the transport pre-downloaded the media. Without them
    /// the ticket keeps the descriptor but no storage URL.
    pub data: Option<Bytes>,
}

/// Terminal outcome of a submission. Infrastructure failures that prevent a
/// durable write surface as `Err` instead.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Accepted(Ticket),
    Rejected(Rejection),
}

pub struct IntakeWorkflow {
    blocks: Arc<dyn BlockRegistry>,
    sessions: Arc<dyn SessionStore>,
    tickets: Arc<dyn TicketRepo>,
    sequencer: Arc<dyn TicketSequencer>,
    rate_limiter: RateLimiter,
    notifier: ModerationNotifier,
    storage: Option<Arc<dyn ObjectStorage>>,
    locks: UserLocks,
}

impl IntakeWorkflow {
    pub fn new(
        blocks: Arc<dyn BlockRegistry>,
        sessions: Arc<dyn SessionStore>,
        tickets: Arc<dyn TicketRepo>,
        sequencer: Arc<dyn TicketSequencer>,
        rate_limiter: RateLimiter,
        notifier: ModerationNotifier,
        storage: Option<Arc<dyn ObjectStorage>>,
    ) -> Self {
        Self {
            blocks,
            sessions,
            tickets,
            sequencer,
            rate_limiter,
            notifier,
            storage,
            locks: UserLocks::new(),
        }
    }

    pub async fn submit(&self, submission: Submission) -> Result<SubmitOutcome> {
        let user_id = submission.user_id;

        // Block presence wins over every other check.
        if self.blocks.is_blocked(user_id).await? {
            return Ok(self.rejected(user_id, Rejection::Blocked));
        }

        if content_filter::check(&submission.text) == Verdict::Reject {
            return Ok(self.rejected(user_id, Rejection::DisallowedContent));
        }

        let Some(category) = self.sessions.get(user_id).await?.category else {
            return Ok(self.rejected(user_id, Rejection::NoCategorySelected));
        };

        // Steps 4-7 of the intake sequence are one logical unit per user.
        let _guard = self.locks.acquire(user_id).await;
        let now = Utc::now();

        if let Gate::Deny { retry_after_secs } = self.rate_limiter.check(user_id, now).await? {
            return Ok(self.rejected(user_id, Rejection::RateLimited { retry_after_secs }));
        }

        let attachment = match submission.attachment {
            Some(incoming) => Some(self.upload_attachment(user_id, incoming, now).await),
            None => None,
        };

        let seq = self.sequencer.next().await?;
        let ticket = self
            .tickets
            .insert(NewTicket {
                ticket_no: ticketing::ticket_no(now, seq),
                user_id,
                category,
                text: submission.text,
                attachment,
                created_at: now,
            })
            .await?;
        self.rate_limiter.mark(user_id, now).await?;
        drop(_guard);

        info!(ticket_no = %ticket.ticket_no, user_id, category = category.as_str(), "ticket created");

        // Already durable; forwarding failure never reaches the submitter.
        self.notifier.forward(&ticket).await;

        Ok(SubmitOutcome::Accepted(ticket))
    }

    /// Uploads attachment bytes to object storage. Failure (or a missing
    /// storage backend, or missing bytes) leaves the descriptor without a URL.
    async fn upload_attachment(
        &self,
        user_id: UserId,
        incoming: IncomingAttachment,
        now: chrono::DateTime<Utc>,
    ) -> Attachment {
        let url = match (&self.storage, &incoming.data) {
            (Some(storage), Some(data)) => {
                let key = format!("{}/{}/{}", user_id, now.format("%Y%m%d"), incoming.file_id);
                match storage.store(data.clone(), &key).await {
                    Ok(url) => Some(url),
                    Err(err) => {
                        warn!(user_id, key, %err, "attachment upload failed, keeping ticket without URL");
                        None
                    }
                }
            }
            _ => None,
        };
        Attachment {
            kind: incoming.kind,
            file_id: incoming.file_id,
            url,
        }
    }

    fn rejected(&self, user_id: UserId, rejection: Rejection) -> SubmitOutcome {
        debug!(user_id, reason = rejection.reason(), "submission rejected");
        SubmitOutcome::Rejected(rejection)
    }
}
