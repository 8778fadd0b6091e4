//! # Core Ports
//!
//! Any adapter must implement these traits to be used by the workflow.
//! Mock implementations are generated by mockall and exposed to external
//! test crates via the `testing` feature.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{BlockEntry, Lang, NewTicket, Session, Ticket, TicketCategory, TicketStatus, UserId};

/// Persistence contract for tickets.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TicketRepo: Send + Sync {
    /// Appends a ticket with status `new`. The ticket number has already been
    /// issued by a [`TicketSequencer`]; the row id is assigned by the store.
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket>;

    async fn find_by_ticket_no(&self, ticket_no: &str) -> Result<Option<Ticket>>;

    /// Overwrites the status of an existing ticket. Callers verify existence
    /// first; updating an unknown number is a no-op.
    async fn set_status(&self, ticket_no: &str, status: TicketStatus) -> Result<()>;

    /// Most recent tickets of one user, newest first.
    async fn list_for_user(&self, user_id: UserId, limit: i64) -> Result<Vec<Ticket>>;
}

/// Issues the strictly increasing ticket sequence.
///
/// Implementations must be safe under concurrent callers: two simultaneous
/// calls never return the same value. Backed by an atomic primitive
/// (database sequence, in-process atomic), never by read-then-compute-max.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TicketSequencer: Send + Sync {
    async fn next(&self) -> Result<i64>;
}

/// Per-user conversational state: language preference and selected category.
/// All writes are idempotent upserts keyed by user id.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored session, or an empty one for first contact.
    async fn get(&self, user_id: UserId) -> Result<Session>;

    async fn set_category(&self, user_id: UserId, category: TicketCategory) -> Result<()>;

    async fn set_lang(&self, user_id: UserId, lang: Lang) -> Result<()>;
}

/// Admin-maintained set of blocked users. Presence of an entry is the
/// block signal.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BlockRegistry: Send + Sync {
    /// Idempotent: blocking an already-blocked user keeps the original entry.
    async fn block(&self, user_id: UserId, reason: Option<String>) -> Result<()>;

    /// Idempotent: unblocking an unblocked user succeeds silently.
    async fn unblock(&self, user_id: UserId) -> Result<()>;

    async fn is_blocked(&self, user_id: UserId) -> Result<bool>;

    /// Recent block entries for admin listing, newest first.
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<BlockEntry>>;
}

/// Last accepted submission per user. One mark per user, overwritten on each
/// accepted submission; absence means "never submitted".
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn last_submission(&self, user_id: UserId) -> Result<Option<DateTime<Utc>>>;

    async fn mark_submission(&self, user_id: UserId, at: DateTime<Utc>) -> Result<()>;
}

/// External object storage for attachment bytes.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Stores the bytes under `key` and returns a public URL.
    async fn store(&self, data: Bytes, key: &str) -> Result<String>;
}

/// The narrow outbound slice of the chat transport the core needs:
/// plain text messages and a rich ticket forward.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ChatSender: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Forwards the ticket with full fidelity (original media, formatting).
    /// Callers fall back to [`ChatSender::send_text`] when this fails.
    async fn forward_ticket(&self, chat_id: i64, ticket: &Ticket) -> Result<()>;
}
