//! Session entity and the local cache slot it is mirrored into.
//!
//! DESIGN
//! ======
//! The cache is a single key-value slot (the browser-`localStorage` shape the
//! app started with): one fixed key, one JSON document. Cache I/O never
//! fails the caller: a miss or a write error degrades to "no cached
//! session" and is logged, nothing more.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Fixed key for the cached session slot.
pub const SESSION_CACHE_KEY: &str = "guva_user";

/// The signed-in principal and its embedded-wallet address.
///
/// `address` is `None` while the provider has confirmed the principal but the
/// wallet address has not yet materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub address: Option<String>,
    #[serde(rename = "isConnected")]
    pub connected: bool,
}

impl Session {
    /// True once the wallet address has materialized.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.address.is_some()
    }

    /// Address for display, with a placeholder while the wallet is pending.
    #[must_use]
    pub fn display_address(&self) -> &str {
        self.address.as_deref().unwrap_or("connecting wallet...")
    }
}

// =============================================================================
// CACHE SLOT
// =============================================================================

/// Single-slot session cache. Load returns `None` on miss or corrupt data;
/// store and clear swallow I/O errors after logging them.
pub trait SessionCache: Send + Sync {
    fn load(&self) -> Option<Session>;
    fn store(&self, session: &Session);
    fn clear(&self);
}

/// File-backed slot: one JSON file named after [`SESSION_CACHE_KEY`].
pub struct FsSessionCache {
    path: PathBuf,
}

impl FsSessionCache {
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self { path: dir.join(format!("{SESSION_CACHE_KEY}.json")) }
    }
}

impl SessionCache for FsSessionCache {
    fn load(&self) -> Option<Session> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt session cache");
                None
            }
        }
    }

    fn store(&self, session: &Session) {
        let Ok(raw) = serde_json::to_string(session) else {
            return;
        };
        if let Some(dir) = self.path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Err(e) = std::fs::write(&self.path, raw) {
            warn!(path = %self.path.display(), error = %e, "session cache write failed");
        }
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "session cache clear failed");
            }
        }
    }
}

/// In-memory slot for tests and cache-less runs.
#[derive(Default)]
pub struct MemorySessionCache {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionCache for MemorySessionCache {
    fn load(&self) -> Option<Session> {
        self.slot.lock().expect("session cache lock poisoned").clone()
    }

    fn store(&self, session: &Session) {
        *self.slot.lock().expect("session cache lock poisoned") = Some(session.clone());
    }

    fn clear(&self) {
        *self.slot.lock().expect("session cache lock poisoned") = None;
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
