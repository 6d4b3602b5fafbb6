//! Owned session store with an update/subscribe contract.
//!
//! ARCHITECTURE
//! ============
//! The current session lives in a `tokio::sync::watch` channel: readers take
//! cheap snapshots via `current()`, long-lived observers await changes via
//! `subscribe()`. Every write goes through this store; nothing else touches
//! the cache slot.
//!
//! TRADE-OFFS
//! ==========
//! Only a complete session (wallet address materialized) is mirrored to the
//! cache slot; a pending session is held in memory until the address arrives.
//! This keeps the slot from ever resurrecting a half-connected login after a
//! restart.

use std::sync::Arc;

use tokio::sync::watch;

use crate::session::{Session, SessionCache};

#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<Option<Session>>>,
    cache: Arc<dyn SessionCache>,
}

impl SessionStore {
    /// Create a store hydrated from the cache slot.
    #[must_use]
    pub fn new(cache: Arc<dyn SessionCache>) -> Self {
        let (tx, _rx) = watch::channel(cache.load());
        Self { tx: Arc::new(tx), cache }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    /// Replace the current session and mirror it to the cache slot once the
    /// wallet address has materialized.
    pub fn set(&self, session: Session) {
        if session.is_complete() {
            self.cache.store(&session);
        }
        self.tx.send_replace(Some(session));
    }

    /// Drop the session from memory and from the cache slot.
    pub fn clear(&self) {
        self.cache.clear();
        self.tx.send_replace(None);
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
