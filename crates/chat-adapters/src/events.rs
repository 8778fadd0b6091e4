//! Transport-facing wire types and command parsing.
//!
//! The transport delivers one [`ChatEvent`] per inbound message, already
//! stripped of its platform-specific shape; authorization of admin context
//! happened upstream (`is_admin`).

use domains::models::{AttachmentKind, Lang, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct ChatEvent {
    pub user_id: UserId,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attachment: Option<EventAttachment>,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventAttachment {
    pub kind: AttachmentKind,
    pub file_id: String,
    /// Raw media bytes when the transport pre-downloaded them.
    #[serde(default)]
    pub data: Option<Vec<u8>>,
}

/// Outbound reply payload. The transport owns rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub text: String,
}

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Parsed slash-command intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Menu,
    About,
    My,
    Complaint,
    Suggestion,
    Lang(Option<Lang>),
    Block { target: Option<UserId>, reason: Option<String> },
    Unblock { target: Option<UserId> },
    SetStatus { args: Vec<String> },
    Blocked { page: i64 },
    Unknown,
}

/// Parses a leading-slash command. Returns `None` for ordinary text.
pub fn parse_command(text: &str) -> Option<Command> {
    let trimmed = text.trim();
    if !trimmed.starts_with('/') {
        return None;
    }
    let mut parts = trimmed.split_whitespace();
    let head = parts.next().unwrap_or_default();

    let command = match head {
        "/start" => Command::Start,
        "/menu" => Command::Menu,
        "/about" => Command::About,
        "/my" => Command::My,
        "/complaint" => Command::Complaint,
        "/suggestion" => Command::Suggestion,
        "/lang" => Command::Lang(parts.next().and_then(Lang::parse)),
        "/block" => {
            let target = parts.next().and_then(|s| s.parse().ok());
            let reason = {
                let rest: Vec<&str> = parts.collect();
                if rest.is_empty() { None } else { Some(rest.join(" ")) }
            };
            Command::Block { target, reason }
        }
        "/unblock" => Command::Unblock { target: parts.next().and_then(|s| s.parse().ok()) },
        "/setstatus" => Command::SetStatus { args: parts.map(str::to_string).collect() },
        "/blocked" => Command::Blocked {
            page: parts.next().and_then(|s| s.parse().ok()).filter(|p| *p >= 1).unwrap_or(1),
        },
        _ => Command::Unknown,
    };
    Some(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(parse_command("the service is slow"), None);
        assert_eq!(parse_command("  leading spaces"), None);
    }

    #[test]
    fn block_with_target_and_reason() {
        assert_eq!(
            parse_command("/block 42 spams links"),
            Some(Command::Block { target: Some(42), reason: Some("spams links".into()) })
        );
        assert_eq!(
            parse_command("/block"),
            Some(Command::Block { target: None, reason: None })
        );
    }

    #[test]
    fn setstatus_keeps_raw_args() {
        assert_eq!(
            parse_command("/setstatus 2026-000001 done"),
            Some(Command::SetStatus { args: vec!["2026-000001".into(), "done".into()] })
        );
    }

    #[test]
    fn lang_accepts_known_codes_only() {
        assert_eq!(parse_command("/lang uz"), Some(Command::Lang(Some(Lang::Uz))));
        assert_eq!(parse_command("/lang fr"), Some(Command::Lang(None)));
    }

    #[test]
    fn unknown_slash_command() {
        assert_eq!(parse_command("/frobnicate"), Some(Command::Unknown));
    }
}
