//! # Domain Models
//!
//! The core entities of the hotline: tickets, per-user session state,
//! block entries, and attachments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Platform-assigned, stable user identifier.
pub type UserId = i64;

/// The two fixed submission kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    Complaint,
    Suggestion,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketCategory::Complaint => "complaint",
            TicketCategory::Suggestion => "suggestion",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "complaint" => Some(TicketCategory::Complaint),
            "suggestion" => Some(TicketCategory::Suggestion),
            _ => None,
        }
    }
}

/// Ticket lifecycle states, in their nominal forward order.
///
/// The order is informative only: admins may move a ticket backward
/// (e.g. `done` back to `new`) and the machine accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    New,
    InProgress,
    Done,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::New => "new",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Done => "done",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(TicketStatus::New),
            "in_progress" => Some(TicketStatus::InProgress),
            "done" => Some(TicketStatus::Done),
            _ => None,
        }
    }
}

/// Supported reply languages. `Ru` is the default for users who never
/// picked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    #[default]
    Ru,
    Uz,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::Uz => "uz",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ru" => Some(Lang::Ru),
            "uz" => Some(Lang::Uz),
            _ => None,
        }
    }
}

/// What kind of media a submission carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Photo,
    Document,
    Voice,
    Video,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Photo => "photo",
            AttachmentKind::Document => "document",
            AttachmentKind::Voice => "voice",
            AttachmentKind::Video => "video",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "photo" => Some(AttachmentKind::Photo),
            "document" => Some(AttachmentKind::Document),
            "voice" => Some(AttachmentKind::Voice),
            "video" => Some(AttachmentKind::Video),
            _ => None,
        }
    }
}

/// Descriptor of a media attachment on a ticket.
///
/// `file_id` is the transport's opaque handle; `url` is set only when the
/// upload to object storage succeeded (the upload is best-effort).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub file_id: String,
    pub url: Option<String>,
}

/// A durable, numbered submission.
///
/// `status` is the only field that mutates after creation; tickets are
/// never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    /// Human-readable number, e.g. "2026-000001". Unique and never reused.
    pub ticket_no: String,
    pub user_id: UserId,
    pub category: TicketCategory,
    /// May be empty for media-only submissions.
    pub text: String,
    pub attachment: Option<Attachment>,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

/// The fields of a ticket the workflow supplies; the row id is assigned at
/// persistence time and the status starts at `new`.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub ticket_no: String,
    pub user_id: UserId,
    pub category: TicketCategory,
    pub text: String,
    pub attachment: Option<Attachment>,
    pub created_at: DateTime<Utc>,
}

/// Per-user conversational state: language preference plus the currently
/// selected category (none until the user picks one).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub lang: Option<Lang>,
    pub category: Option<TicketCategory>,
}

/// Presence of this entry is the block signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockEntry {
    pub user_id: UserId,
    pub reason: Option<String>,
    pub blocked_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for s in [TicketStatus::New, TicketStatus::InProgress, TicketStatus::Done] {
            assert_eq!(TicketStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(TicketStatus::parse("closed"), None);
    }

    #[test]
    fn category_rejects_unknown_kinds() {
        assert_eq!(TicketCategory::parse("complaint"), Some(TicketCategory::Complaint));
        assert_eq!(TicketCategory::parse("praise"), None);
    }

    #[test]
    fn default_lang_is_russian() {
        assert_eq!(Lang::default(), Lang::Ru);
    }
}
