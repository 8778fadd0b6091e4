//! # StatusMachine
//!
//! Validates and applies admin-triggered ticket status changes.
//!
//! The state set is `new` → `in_progress` → `done`, but ordering is not
//! enforced: an admin may move a ticket backward and the change is applied.
//! Unknown tickets and unknown target states are rejected. On success the
//! submitter is notified best-effort; a dropped notification never rolls the
//! status back.

use std::sync::Arc;

use domains::error::{AppError, Result};
use domains::models::{Ticket, TicketStatus};
use domains::ports::{SessionStore, TicketRepo};
use tracing::info;

use crate::moderation::ModerationNotifier;

pub struct StatusMachine {
    tickets: Arc<dyn TicketRepo>,
    sessions: Arc<dyn SessionStore>,
    notifier: ModerationNotifier,
}

impl StatusMachine {
    pub fn new(
        tickets: Arc<dyn TicketRepo>,
        sessions: Arc<dyn SessionStore>,
        notifier: ModerationNotifier,
    ) -> Self {
        Self { tickets, sessions, notifier }
    }

    /// Applies `target` to the named ticket and returns the updated ticket.
    ///
    /// Errors: [`AppError::InvalidState`] when `target` is not one of the
    /// three states, [`AppError::NotFound`] when the ticket number is
    /// unknown. Neither mutates anything.
    pub async fn transition(&self, ticket_no: &str, target: &str) -> Result<Ticket> {
        let Some(status) = TicketStatus::parse(target) else {
            return Err(AppError::InvalidState(target.to_string()));
        };

        let Some(mut ticket) = self.tickets.find_by_ticket_no(ticket_no).await? else {
            return Err(AppError::NotFound("ticket", ticket_no.to_string()));
        };

        self.tickets.set_status(ticket_no, status).await?;
        ticket.status = status;
        info!(ticket_no, status = status.as_str(), "ticket status changed");

        let lang = self
            .sessions
            .get(ticket.user_id)
            .await
            .map(|s| s.lang.unwrap_or_default())
            .unwrap_or_default();
        self.notifier
            .notify_status(ticket.user_id, lang, ticket_no, status)
            .await;

        Ok(ticket)
    }
}
