//! Per-user advisory locks.
//!
//! The intake workflow holds a user's lock across the rate-limit check,
//! ticket persistence, and the mark update, so near-simultaneous submissions
//! from the same user serialize instead of racing the cooldown.

use std::sync::Arc;

use dashmap::DashMap;
use domains::models::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct UserLocks {
    inner: DashMap<UserId, Arc<Mutex<()>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and returns the lock for one user. Locks for distinct users
    /// are independent.
    pub async fn acquire(&self, user_id: UserId) -> OwnedMutexGuard<()> {
        let mutex = self
            .inner
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_user_serializes() {
        let locks = Arc::new(UserLocks::new());
        let guard = locks.acquire(1).await;

        let locks2 = locks.clone();
        let contender = tokio::spawn(async move {
            let _g = locks2.acquire(1).await;
        });

        // Still pending while we hold the guard.
        tokio::task::yield_now().await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn distinct_users_do_not_contend() {
        let locks = UserLocks::new();
        let _a = locks.acquire(1).await;
        // Must not deadlock.
        let _b = locks.acquire(2).await;
    }
}
