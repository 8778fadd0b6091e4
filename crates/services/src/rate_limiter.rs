//! # RateLimiter
//!
//! Per-user cooldown gate over the [`RateLimitStore`] port. The check and the
//! mark update are separate operations; the workflow holds the per-user lock
//! across both (see `locks`) so a user cannot slip two submissions through
//! the window between them.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use domains::error::Result;
use domains::ports::RateLimitStore;
use domains::models::UserId;

pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allow,
    /// Whole seconds until the next submission is allowed. Always > 0.
    Deny { retry_after_secs: u64 },
}

#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    cooldown: chrono::Duration,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, cooldown: Duration) -> Self {
        Self {
            store,
            cooldown: chrono::Duration::from_std(cooldown)
                .unwrap_or_else(|_| chrono::Duration::seconds(30)),
        }
    }

    /// Allows users with no mark, or whose last accepted submission is at
    /// least one cooldown in the past.
    pub async fn check(&self, user_id: UserId, now: DateTime<Utc>) -> Result<Gate> {
        let Some(last) = self.store.last_submission(user_id).await? else {
            return Ok(Gate::Allow);
        };
        let elapsed = now - last;
        if elapsed >= self.cooldown {
            Ok(Gate::Allow)
        } else {
            let remaining = (self.cooldown - elapsed).num_seconds().max(1) as u64;
            Ok(Gate::Deny { retry_after_secs: remaining })
        }
    }

    /// Overwrites the user's mark. Called once per accepted submission,
    /// after the ticket row is durable.
    pub async fn mark(&self, user_id: UserId, now: DateTime<Utc>) -> Result<()> {
        self.store.mark_submission(user_id, now).await
    }
}
