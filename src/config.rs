//! Application configuration parsed from environment variables.

use std::path::PathBuf;

use crate::chain;

pub const DEFAULT_WALLET_BASE_URL: &str = "https://api.cdp.coinbase.com/platform";
pub const DEFAULT_WALLET_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_WALLET_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STUDIO_LATENCY_MS: u64 = 3000;
pub const DEFAULT_FORGE_LATENCY_MS: u64 = 2000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("missing wallet project id: env var {var} not set")]
    MissingProjectId { var: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Connection settings for the embedded-wallet provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    pub base_url: String,
    pub project_id: String,
    pub timeouts: WalletTimeouts,
}

impl WalletConfig {
    /// Build wallet provider config from environment variables.
    ///
    /// Required:
    /// - `WALLET_PROJECT_ID`
    ///
    /// Optional:
    /// - `WALLET_BASE_URL`: default Coinbase CDP platform API
    /// - `WALLET_REQUEST_TIMEOUT_SECS`: default 30
    /// - `WALLET_CONNECT_TIMEOUT_SECS`: default 10
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = std::env::var("WALLET_PROJECT_ID")
            .map_err(|_| ConfigError::MissingProjectId { var: "WALLET_PROJECT_ID".into() })?;
        let base_url = std::env::var("WALLET_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_WALLET_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = WalletTimeouts {
            request_secs: env_parse_u64("WALLET_REQUEST_TIMEOUT_SECS", DEFAULT_WALLET_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("WALLET_CONNECT_TIMEOUT_SECS", DEFAULT_WALLET_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, project_id, timeouts })
    }
}

/// Everything outside the wallet provider: chain selection, session cache
/// location, and mock-job latencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Network all contract reads target. Defaults to Sepolia.
    pub chain_id: u64,
    /// Directory for the session cache slot. `None` keeps the session in
    /// memory only.
    pub cache_dir: Option<PathBuf>,
    pub studio_latency_ms: u64,
    pub forge_latency_ms: u64,
}

impl AppConfig {
    /// Build app config from environment variables.
    ///
    /// Optional:
    /// - `CHAIN_ID`: must name a configured network (default Sepolia)
    /// - `CACHE_DIR`: session cache directory (default: in-memory only)
    /// - `STUDIO_LATENCY_MS`: simulated generation latency, default 3000
    /// - `FORGE_LATENCY_MS`: simulated mint/train latency, default 2000
    pub fn from_env() -> Result<Self, ConfigError> {
        let chain_id = parse_chain_id(std::env::var("CHAIN_ID").ok().as_deref())?;
        let cache_dir = std::env::var("CACHE_DIR").ok().map(PathBuf::from);

        Ok(Self {
            chain_id,
            cache_dir,
            studio_latency_ms: env_parse_u64("STUDIO_LATENCY_MS", DEFAULT_STUDIO_LATENCY_MS),
            forge_latency_ms: env_parse_u64("FORGE_LATENCY_MS", DEFAULT_FORGE_LATENCY_MS),
        })
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_chain_id(raw: Option<&str>) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(chain::SEPOLIA.chain_id);
    };
    let chain_id = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::Parse(format!("invalid CHAIN_ID: {raw}")))?;
    if chain::network_by_chain_id(chain_id).is_none() {
        return Err(ConfigError::Parse(format!("unsupported CHAIN_ID: {chain_id}")));
    }
    Ok(chain_id)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
