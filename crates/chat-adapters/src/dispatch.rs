//! # Dispatcher
//!
//! The single entry point from the chat transport: `handle(event)` routes
//! user intents (category/language selection, submissions, listings) and
//! pre-authorized admin intents (block, unblock, setstatus) into the core
//! services and renders localized replies.
//!
//! The dispatcher assumes nothing about the transport's concurrency model
//! beyond "possibly concurrent calls, one per event".

use std::collections::HashSet;
use std::sync::Arc;

use bytes::Bytes;
use domains::error::{AppError, Rejection};
use domains::models::{Lang, UserId};
use domains::ports::{BlockRegistry, SessionStore, TicketRepo};
use services::intake::{IncomingAttachment, Submission, SubmitOutcome};
use services::{IntakeWorkflow, StatusMachine};
use tracing::error;

use crate::catalog;
use crate::events::{parse_command, ChatEvent, Command, Reply};
use crate::metrics::Metrics;

const MY_TICKETS_LIMIT: i64 = 10;
const PREVIEW_CHARS: usize = 100;
const BLOCKED_PAGE_SIZE: i64 = 50;

pub struct Dispatcher {
    workflow: Arc<IntakeWorkflow>,
    status_machine: Arc<StatusMachine>,
    sessions: Arc<dyn SessionStore>,
    blocks: Arc<dyn BlockRegistry>,
    tickets: Arc<dyn TicketRepo>,
    /// Ids that may never be blocked, even by another admin.
    admin_ids: HashSet<UserId>,
    metrics: Arc<Metrics>,
}

impl Dispatcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        workflow: Arc<IntakeWorkflow>,
        status_machine: Arc<StatusMachine>,
        sessions: Arc<dyn SessionStore>,
        blocks: Arc<dyn BlockRegistry>,
        tickets: Arc<dyn TicketRepo>,
        admin_ids: HashSet<UserId>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { workflow, status_machine, sessions, blocks, tickets, admin_ids, metrics }
    }

    /// Handles one inbound event. `None` means no reply is owed (admin
    /// commands from a non-admin context are ignored, as in the transport
    /// conventions this engine grew up with).
    pub async fn handle(&self, event: ChatEvent) -> Option<Reply> {
        let session = match self.sessions.get(event.user_id).await {
            Ok(session) => session,
            // Session language is unknown here, so the outage notice defaults.
            Err(err) => return Some(self.infra_failure(Lang::default(), err)),
        };
        let lang = session.lang.unwrap_or_default();

        let command = event.text.as_deref().and_then(parse_command);
        match command {
            Some(command) => self.handle_command(&event, lang, session.lang.is_none(), command).await,
            None => Some(self.handle_submission(event, lang).await),
        }
    }

    async fn handle_command(
        &self,
        event: &ChatEvent,
        lang: Lang,
        lang_unset: bool,
        command: Command,
    ) -> Option<Reply> {
        let user_id = event.user_id;
        let reply = match command {
            Command::Start => {
                if lang_unset {
                    Reply::new(catalog::choose_lang())
                } else {
                    Reply::new(format!("{}\n{}", catalog::welcome(lang), catalog::menu(lang)))
                }
            }
            Command::Menu => Reply::new(catalog::menu(lang)),
            Command::About => Reply::new(catalog::about(lang)),
            Command::Lang(None) => Reply::new(catalog::choose_lang()),
            Command::Lang(Some(chosen)) => {
                if let Err(err) = self.sessions.set_lang(user_id, chosen).await {
                    return Some(self.infra_failure(lang, err));
                }
                Reply::new(format!("{}\n{}", catalog::welcome(chosen), catalog::menu(chosen)))
            }
            Command::Complaint => self.select_category(user_id, lang, domains::TicketCategory::Complaint).await,
            Command::Suggestion => self.select_category(user_id, lang, domains::TicketCategory::Suggestion).await,
            Command::My => self.my_tickets(user_id, lang).await,
            Command::Block { target, reason } => {
                if !event.is_admin {
                    return None;
                }
                self.block(lang, target, reason).await
            }
            Command::Unblock { target } => {
                if !event.is_admin {
                    return None;
                }
                self.unblock(lang, target).await
            }
            Command::SetStatus { args } => {
                if !event.is_admin {
                    return None;
                }
                self.set_status(lang, &args).await
            }
            Command::Blocked { page } => {
                if !event.is_admin {
                    return None;
                }
                self.blocked_list(lang, page).await
            }
            Command::Unknown => Reply::new(catalog::menu(lang)),
        };
        Some(reply)
    }

    async fn select_category(
        &self,
        user_id: UserId,
        lang: Lang,
        category: domains::TicketCategory,
    ) -> Reply {
        match self.sessions.set_category(user_id, category).await {
            Ok(()) => Reply::new(catalog::category_set(lang, category)),
            Err(err) => self.infra_failure(lang, err),
        }
    }

    async fn my_tickets(&self, user_id: UserId, lang: Lang) -> Reply {
        let tickets = match self.tickets.list_for_user(user_id, MY_TICKETS_LIMIT).await {
            Ok(tickets) => tickets,
            Err(err) => return self.infra_failure(lang, err),
        };
        if tickets.is_empty() {
            return Reply::new(catalog::my_empty(lang));
        }
        let mut lines = vec![catalog::my_list_title(lang).to_string(), "— — —".to_string()];
        for ticket in tickets {
            let preview = preview(&ticket.text);
            lines.push(format!(
                "• {} | {} | {} | {}\n— {}",
                ticket.ticket_no,
                catalog::category_name(lang, ticket.category),
                ticket.status.as_str(),
                ticket.created_at.format("%Y-%m-%d %H:%M"),
                preview,
            ));
        }
        Reply::new(lines.join("\n"))
    }

    async fn handle_submission(&self, event: ChatEvent, lang: Lang) -> Reply {
        let submission = Submission {
            user_id: event.user_id,
            text: event.text.unwrap_or_default(),
            attachment: event.attachment.map(|a| IncomingAttachment {
                kind: a.kind,
                file_id: a.file_id,
                data: a.data.map(Bytes::from),
            }),
        };

        match self.workflow.submit(submission).await {
            Ok(SubmitOutcome::Accepted(ticket)) => {
                self.metrics.accepted.inc();
                Reply::new(catalog::saved(lang, &ticket.ticket_no))
            }
            Ok(SubmitOutcome::Rejected(rejection)) => {
                self.metrics.record_rejection(rejection.reason());
                match rejection {
                    Rejection::Blocked => Reply::new(catalog::blocked(lang)),
                    Rejection::DisallowedContent => Reply::new(catalog::link_block(lang)),
                    Rejection::NoCategorySelected => Reply::new(catalog::select_category(lang)),
                    Rejection::RateLimited { retry_after_secs } => {
                        Reply::new(catalog::rate_limited(lang, retry_after_secs))
                    }
                }
            }
            Err(err) => self.infra_failure(lang, err),
        }
    }

    async fn block(&self, lang: Lang, target: Option<UserId>, reason: Option<String>) -> Reply {
        let Some(target) = target else {
            return Reply::new(catalog::block_usage(lang));
        };
        if self.admin_ids.contains(&target) {
            return Reply::new(catalog::cant_block_admin(lang));
        }
        match self.blocks.block(target, reason.clone()).await {
            Ok(()) => Reply::new(catalog::blocked_ok(lang, target, reason.as_deref())),
            Err(err) => self.infra_failure(lang, err),
        }
    }

    async fn unblock(&self, lang: Lang, target: Option<UserId>) -> Reply {
        let Some(target) = target else {
            return Reply::new(catalog::unblock_usage(lang));
        };
        match self.blocks.unblock(target).await {
            Ok(()) => Reply::new(catalog::unblocked_ok(lang, target)),
            Err(err) => self.infra_failure(lang, err),
        }
    }

    async fn set_status(&self, lang: Lang, args: &[String]) -> Reply {
        let [ticket_no, target] = args else {
            return Reply::new(catalog::status_usage(lang));
        };
        match self.status_machine.transition(ticket_no, target).await {
            Ok(ticket) => {
                self.metrics.status_changes.inc();
                Reply::new(catalog::status_ok(lang, &ticket.ticket_no, ticket.status.as_str()))
            }
            Err(AppError::NotFound(_, _)) => Reply::new(catalog::ticket_not_found(lang, ticket_no)),
            Err(AppError::InvalidState(_)) => Reply::new(catalog::status_usage(lang)),
            Err(err) => self.infra_failure(lang, err),
        }
    }

    async fn blocked_list(&self, lang: Lang, page: i64) -> Reply {
        let offset = (page - 1) * BLOCKED_PAGE_SIZE;
        let entries = match self.blocks.list(BLOCKED_PAGE_SIZE, offset).await {
            Ok(entries) => entries,
            Err(err) => return self.infra_failure(lang, err),
        };
        if entries.is_empty() {
            return Reply::new(catalog::blocked_empty(lang));
        }
        let mut lines = vec![catalog::blocked_list_title(lang, page)];
        for entry in entries {
            lines.push(format!(
                "• {} | {} | {}",
                entry.user_id,
                entry.reason.as_deref().unwrap_or("-"),
                entry.blocked_at.format("%Y-%m-%d %H:%M"),
            ));
        }
        Reply::new(lines.join("\n"))
    }

    fn infra_failure(&self, lang: Lang, err: AppError) -> Reply {
        error!(%err, "event handling failed");
        Reply::new(catalog::try_later(lang))
    }
}

fn preview(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}…")
    } else {
        flat
    }
}
