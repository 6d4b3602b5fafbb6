//! Shared application state.
//!
//! DESIGN
//! ======
//! One struct owns every long-lived handle: the wallet capability (absent
//! when unconfigured, which only disables sign-in), the session store, the
//! per-network provider cache, and the mocked job runners.

use std::sync::Arc;
use std::time::Duration;

use crate::chain::ProviderCache;
use crate::config::AppConfig;
use crate::market::forge::Forge;
use crate::market::studio::Studio;
use crate::session::{FsSessionCache, MemorySessionCache, SessionCache};
use crate::store::SessionStore;
use crate::wallet::WalletAuth;

pub struct AppState {
    /// `None` if wallet env vars are not configured; sign-in is disabled.
    pub wallet: Option<Arc<dyn WalletAuth>>,
    pub sessions: SessionStore,
    pub chains: Arc<ProviderCache>,
    pub studio: Studio,
    pub forge: Forge,
    /// Network all contract reads target.
    pub chain_id: u64,
}

impl AppState {
    #[must_use]
    pub fn new(config: &AppConfig, wallet: Option<Arc<dyn WalletAuth>>) -> Self {
        let cache: Arc<dyn SessionCache> = match &config.cache_dir {
            Some(dir) => Arc::new(FsSessionCache::new(dir)),
            None => Arc::new(MemorySessionCache::new()),
        };

        Self {
            wallet,
            sessions: SessionStore::new(cache),
            chains: Arc::new(ProviderCache::new()),
            studio: Studio::new(Duration::from_millis(config.studio_latency_ms)),
            forge: Forge::new(Duration::from_millis(config.forge_latency_ms)),
            chain_id: config.chain_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            chain_id: crate::chain::SEPOLIA.chain_id,
            cache_dir: None,
            studio_latency_ms: 0,
            forge_latency_ms: 0,
        }
    }

    #[test]
    fn new_state_starts_without_a_session() {
        let state = AppState::new(&test_config(), None);
        assert!(state.sessions.current().is_none());
        assert!(state.wallet.is_none());
        assert_eq!(state.chain_id, crate::chain::SEPOLIA.chain_id);
    }
}
