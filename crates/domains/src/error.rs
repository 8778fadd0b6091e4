//! # AppError
//!
//! Centralized error handling for the hotline core. Policy rejections are
//! *not* errors — they are ordinary outcomes (see [`Rejection`]) surfaced to
//! the submitter as localized messages. `AppError` covers the cases where the
//! operation itself could not run.

use thiserror::Error;

/// The primary error type for core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g. unknown ticket number on a status change).
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// An admin intent named a value outside the fixed set
    /// (e.g. an unknown target status).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Infrastructure failure (DB down, storage timeout).
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// Wraps any displayable failure from an adapter as an internal error.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// A specialized Result type for core logic.
pub type Result<T> = std::result::Result<T, AppError>;

/// Why a submission was turned away. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The user has an active block entry.
    Blocked,
    /// The text contained a link or a handle-like mention.
    DisallowedContent,
    /// The user has not picked complaint/suggestion yet; the caller should
    /// re-prompt rather than treat this as a hard failure.
    NoCategorySelected,
    /// Submitted again inside the cooldown window.
    RateLimited { retry_after_secs: u64 },
}

impl Rejection {
    /// Stable machine-readable reason tag, used in logs and metrics labels.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::Blocked => "blocked",
            Rejection::DisallowedContent => "disallowed-content",
            Rejection::NoCategorySelected => "no-category-selected",
            Rejection::RateLimited { .. } => "rate-limited",
        }
    }
}
