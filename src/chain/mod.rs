//! Read-only chain access: network table, per-network provider cache, and
//! the JSON-RPC / ABI plumbing underneath the contract readers.

pub mod abi;
pub mod reader;
pub mod rpc;
pub mod units;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rpc::RpcClient;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors produced by the chain read layer.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// No configured network matches the requested chain id.
    #[error("unsupported network: {0}")]
    UnsupportedNetwork(u64),

    /// The HTTP request to the RPC endpoint failed.
    #[error("rpc request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a JSON-RPC error object.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response body could not be interpreted.
    #[error("rpc response parse failed: {0}")]
    Parse(String),

    /// Returned call data did not match the expected ABI shape.
    #[error("abi decode failed: {0}")]
    AbiDecode(String),

    /// A value could not be encoded or parsed for the wire.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// NETWORKS
// =============================================================================

/// Statically configured network endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    pub chain_id: u64,
    pub name: &'static str,
    pub rpc_url: &'static str,
    pub explorer: &'static str,
}

pub const MAINNET: Network = Network {
    chain_id: 1,
    name: "Ethereum Mainnet",
    rpc_url: "https://eth-mainnet.g.alchemy.com/v2/demo",
    explorer: "https://etherscan.io",
};

pub const SEPOLIA: Network = Network {
    chain_id: 11_155_111,
    name: "Sepolia Testnet",
    rpc_url: "https://eth-sepolia.g.alchemy.com/v2/demo",
    explorer: "https://sepolia.etherscan.io",
};

pub const NETWORKS: [Network; 2] = [MAINNET, SEPOLIA];

#[must_use]
pub fn network_by_chain_id(chain_id: u64) -> Option<&'static Network> {
    NETWORKS.iter().find(|n| n.chain_id == chain_id)
}

/// Placeholder contract addresses the marketplace reads against.
pub mod contracts {
    pub const NFT_COLLECTION: &str = "0x1234567890123456789012345678901234567890";
    pub const NFT_MARKETPLACE: &str = "0x0987654321098765432109876543210987654321";
    pub const GUVA_TOKEN: &str = "0x1111111111111111111111111111111111111111";
}

// =============================================================================
// PROVIDER CACHE
// =============================================================================

/// Per-network RPC clients, created on first use and reused afterwards.
#[derive(Default)]
pub struct ProviderCache {
    providers: RwLock<HashMap<u64, Arc<RpcClient>>>,
}

impl ProviderCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Client for the given chain id.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnsupportedNetwork`] for an unconfigured chain
    /// id, or [`ChainError::HttpClientBuild`] if the client cannot be built.
    pub fn provider(&self, chain_id: u64) -> Result<Arc<RpcClient>, ChainError> {
        if let Some(client) = self
            .providers
            .read()
            .expect("provider cache lock poisoned")
            .get(&chain_id)
        {
            return Ok(Arc::clone(client));
        }

        let network = network_by_chain_id(chain_id).ok_or(ChainError::UnsupportedNetwork(chain_id))?;
        let client = Arc::new(RpcClient::new(network.rpc_url)?);

        let mut providers = self.providers.write().expect("provider cache lock poisoned");
        // A concurrent caller may have filled the slot in the meantime.
        Ok(Arc::clone(providers.entry(chain_id).or_insert(client)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_lookup_by_chain_id() {
        assert_eq!(network_by_chain_id(1), Some(&MAINNET));
        assert_eq!(network_by_chain_id(11_155_111), Some(&SEPOLIA));
        assert_eq!(network_by_chain_id(1337), None);
    }

    #[test]
    fn provider_cache_reuses_clients() {
        let cache = ProviderCache::new();
        let a = cache.provider(SEPOLIA.chain_id).unwrap();
        let b = cache.provider(SEPOLIA.chain_id).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn provider_cache_rejects_unknown_networks() {
        let cache = ProviderCache::new();
        assert!(matches!(cache.provider(1337), Err(ChainError::UnsupportedNetwork(1337))));
    }
}
