//! In-memory adapters for every storage port.
//!
//! Backed by `DashMap` and atomics; used by the test suites and by the
//! binary when no database is configured. Semantics mirror the Postgres
//! adapters: idempotent upserts, presence-keyed blocks, an atomic sequence.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use domains::error::Result;
use domains::models::{
    BlockEntry, Lang, NewTicket, Session, Ticket, TicketCategory, TicketStatus, UserId,
};
use domains::ports::{
    BlockRegistry, RateLimitStore, SessionStore, TicketRepo, TicketSequencer,
};

#[derive(Default)]
pub struct MemoryTicketRepo {
    by_no: DashMap<String, Ticket>,
    next_id: AtomicI64,
}

impl MemoryTicketRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketRepo for MemoryTicketRepo {
    async fn insert(&self, ticket: NewTicket) -> Result<Ticket> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let ticket = Ticket {
            id,
            ticket_no: ticket.ticket_no,
            user_id: ticket.user_id,
            category: ticket.category,
            text: ticket.text,
            attachment: ticket.attachment,
            status: TicketStatus::New,
            created_at: ticket.created_at,
        };
        self.by_no.insert(ticket.ticket_no.clone(), ticket.clone());
        Ok(ticket)
    }

    async fn find_by_ticket_no(&self, ticket_no: &str) -> Result<Option<Ticket>> {
        Ok(self.by_no.get(ticket_no).map(|t| t.clone()))
    }

    async fn set_status(&self, ticket_no: &str, status: TicketStatus) -> Result<()> {
        if let Some(mut ticket) = self.by_no.get_mut(ticket_no) {
            ticket.status = status;
        }
        Ok(())
    }

    async fn list_for_user(&self, user_id: UserId, limit: i64) -> Result<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self
            .by_no
            .iter()
            .filter(|t| t.user_id == user_id)
            .map(|t| t.clone())
            .collect();
        tickets.sort_by(|a, b| b.id.cmp(&a.id));
        tickets.truncate(limit.max(0) as usize);
        Ok(tickets)
    }
}

/// In-process atomic counter. First issued value is 1.
#[derive(Default)]
pub struct MemoryTicketSequencer {
    counter: AtomicI64,
}

impl MemoryTicketSequencer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketSequencer for MemoryTicketSequencer {
    async fn next(&self) -> Result<i64> {
        Ok(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: DashMap<UserId, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, user_id: UserId) -> Result<Session> {
        Ok(self
            .sessions
            .get(&user_id)
            .map(|s| s.clone())
            .unwrap_or(Session { user_id, ..Session::default() }))
    }

    async fn set_category(&self, user_id: UserId, category: TicketCategory) -> Result<()> {
        self.sessions
            .entry(user_id)
            .or_insert(Session { user_id, ..Session::default() })
            .category = Some(category);
        Ok(())
    }

    async fn set_lang(&self, user_id: UserId, lang: Lang) -> Result<()> {
        self.sessions
            .entry(user_id)
            .or_insert(Session { user_id, ..Session::default() })
            .lang = Some(lang);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBlockRegistry {
    blocked: DashMap<UserId, BlockEntry>,
}

impl MemoryBlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlockRegistry for MemoryBlockRegistry {
    async fn block(&self, user_id: UserId, reason: Option<String>) -> Result<()> {
        // Keep the original entry when already blocked.
        self.blocked.entry(user_id).or_insert(BlockEntry {
            user_id,
            reason,
            blocked_at: Utc::now(),
        });
        Ok(())
    }

    async fn unblock(&self, user_id: UserId) -> Result<()> {
        self.blocked.remove(&user_id);
        Ok(())
    }

    async fn is_blocked(&self, user_id: UserId) -> Result<bool> {
        Ok(self.blocked.contains_key(&user_id))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<BlockEntry>> {
        let mut entries: Vec<BlockEntry> =
            self.blocked.iter().map(|e| e.clone()).collect();
        entries.sort_by(|a, b| b.blocked_at.cmp(&a.blocked_at));
        Ok(entries
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryRateLimitStore {
    marks: DashMap<UserId, DateTime<Utc>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn last_submission(&self, user_id: UserId) -> Result<Option<DateTime<Utc>>> {
        Ok(self.marks.get(&user_id).map(|m| *m))
    }

    async fn mark_submission(&self, user_id: UserId, at: DateTime<Utc>) -> Result<()> {
        self.marks.insert(user_id, at);
        Ok(())
    }
}
