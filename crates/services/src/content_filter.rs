//! # ContentFilter
//!
//! Stateless gate rejecting submissions that carry links or handle-like
//! mentions. Pure function of the input text; media-only submissions
//! (empty text) pass through.

use once_cell::sync::Lazy;
use regex::Regex;

/// URL schemes, bare `www.`, chat deep-link hosts, and `@name` mentions of
/// four or more word characters.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(https?://|www\.|t\.me/|telegram\.me/|@[a-zA-Z0-9_]{4,}|://)")
        .expect("content filter pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

/// Checks raw submitted text. No side effects.
pub fn check(text: &str) -> Verdict {
    if text.trim().is_empty() {
        return Verdict::Accept;
    }
    if DISALLOWED.is_match(text) {
        Verdict::Reject
    } else {
        Verdict::Accept
    }
}
