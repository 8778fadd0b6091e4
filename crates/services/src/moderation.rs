//! # ModerationNotifier
//!
//! Forwards freshly created tickets to the moderation channel and delivers
//! status-change notices to submitters. Every send is best-effort and bounded
//! by a timeout: failures are logged and swallowed, never surfaced to the
//! submitter, because by the time a send happens the ticket is already
//! durable.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use domains::error::{AppError, Result};
use domains::models::{Lang, Ticket, TicketStatus, UserId};
use domains::ports::ChatSender;
use tracing::warn;

pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct ModerationNotifier {
    sender: Arc<dyn ChatSender>,
    /// Chat id of the moderation channel; 0 disables forwarding.
    mod_chat_id: i64,
    send_timeout: Duration,
}

impl ModerationNotifier {
    pub fn new(sender: Arc<dyn ChatSender>, mod_chat_id: i64, send_timeout: Duration) -> Self {
        Self { sender, mod_chat_id, send_timeout }
    }

    /// Forwards a new ticket to the moderation channel. Tries a rich forward
    /// first; if that fails, degrades to a plain-text summary. Total failure
    /// is logged and swallowed.
    pub async fn forward(&self, ticket: &Ticket) {
        if self.mod_chat_id == 0 {
            return;
        }
        if self
            .bounded(self.sender.forward_ticket(self.mod_chat_id, ticket))
            .await
            .is_ok()
        {
            return;
        }
        let summary = summary_text(ticket);
        if let Err(err) = self.bounded(self.sender.send_text(self.mod_chat_id, &summary)).await {
            warn!(ticket_no = %ticket.ticket_no, %err, "moderation forward dropped");
        }
    }

    /// Tells the submitter their ticket changed status. Best-effort.
    pub async fn notify_status(
        &self,
        user_id: UserId,
        lang: Lang,
        ticket_no: &str,
        status: TicketStatus,
    ) {
        let text = status_notice(lang, ticket_no, status);
        if let Err(err) = self.bounded(self.sender.send_text(user_id, &text)).await {
            warn!(ticket_no, user_id, %err, "status notification dropped");
        }
    }

    async fn bounded<F>(&self, fut: F) -> Result<()>
    where
        F: Future<Output = Result<()>>,
    {
        match tokio::time::timeout(self.send_timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(AppError::internal("chat send timed out")),
        }
    }
}

/// Plain-text fallback shown in the moderation channel when the rich forward
/// fails.
fn summary_text(ticket: &Ticket) -> String {
    format!(
        "New {} {}:\n{}",
        ticket.category.as_str(),
        ticket.ticket_no,
        ticket.text
    )
}

/// Localized status-change notice for the submitter.
fn status_notice(lang: Lang, ticket_no: &str, status: TicketStatus) -> String {
    match lang {
        Lang::Ru => format!(
            "ℹ️ По вашей заявке {} установлен статус: {}.",
            ticket_no,
            status.as_str()
        ),
        Lang::Uz => format!(
            "ℹ️ Sizning {} arizangiz holati: {}.",
            ticket_no,
            status.as_str()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domains::models::{Ticket, TicketCategory};
    use domains::ports::MockChatSender;

    fn ticket() -> Ticket {
        Ticket {
            id: 1,
            ticket_no: "2026-000001".into(),
            user_id: 42,
            category: TicketCategory::Complaint,
            text: "service is slow".into(),
            attachment: None,
            status: TicketStatus::New,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn falls_back_to_summary_when_forward_fails() {
        let mut sender = MockChatSender::new();
        sender
            .expect_forward_ticket()
            .times(1)
            .returning(|_, _| Err(AppError::internal("boom")));
        sender
            .expect_send_text()
            .withf(|chat, text| *chat == 99 && text.contains("2026-000001"))
            .times(1)
            .returning(|_, _| Ok(()));

        let notifier = ModerationNotifier::new(Arc::new(sender), 99, DEFAULT_SEND_TIMEOUT);
        notifier.forward(&ticket()).await;
    }

    #[tokio::test]
    async fn disabled_channel_sends_nothing() {
        let sender = MockChatSender::new(); // any call would panic
        let notifier = ModerationNotifier::new(Arc::new(sender), 0, DEFAULT_SEND_TIMEOUT);
        notifier.forward(&ticket()).await;
    }

    #[tokio::test]
    async fn total_failure_is_swallowed() {
        let mut sender = MockChatSender::new();
        sender
            .expect_forward_ticket()
            .returning(|_, _| Err(AppError::internal("down")));
        sender
            .expect_send_text()
            .returning(|_, _| Err(AppError::internal("still down")));

        let notifier = ModerationNotifier::new(Arc::new(sender), 99, DEFAULT_SEND_TIMEOUT);
        // Must not panic or propagate.
        notifier.forward(&ticket()).await;
    }

    #[tokio::test]
    async fn status_notice_reaches_submitter_in_their_language() {
        let mut sender = MockChatSender::new();
        sender
            .expect_send_text()
            .withf(|chat, text| *chat == 42 && text.contains("in_progress") && text.contains("arizangiz"))
            .times(1)
            .returning(|_, _| Ok(()));

        let notifier = ModerationNotifier::new(Arc::new(sender), 99, DEFAULT_SEND_TIMEOUT);
        notifier
            .notify_status(42, Lang::Uz, "2026-000001", TicketStatus::InProgress)
            .await;
    }
}
