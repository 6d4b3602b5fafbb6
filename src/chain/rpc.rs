//! Minimal JSON-RPC 2.0 client over HTTP.
//!
//! Thin transport wrapper in the same shape as the wallet provider client:
//! reqwest does the wire work, pure functions do the parsing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ethereum_types::{H160, U256};
use serde_json::{Value, json};

use super::ChainError;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: &str) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ChainError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, url: url.to_string(), next_id: AtomicU64::new(1) })
    }

    /// Issue one JSON-RPC call and return the `result` value.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        if status != 200 {
            return Err(ChainError::Transport(format!("status {status}: {text}")));
        }

        parse_rpc_response(&text)
    }

    /// `eth_call` against a contract, returning the raw return data.
    pub async fn eth_call(&self, to: H160, data: &[u8]) -> Result<Vec<u8>, ChainError> {
        let params = json!([
            { "to": format!("0x{}", hex::encode(to.as_bytes())), "data": format!("0x{}", hex::encode(data)) },
            "latest",
        ]);
        let result = self.call("eth_call", params).await?;
        decode_hex_bytes(&result)
    }

    /// Native balance of an account, in wei.
    pub async fn eth_get_balance(&self, address: H160) -> Result<U256, ChainError> {
        let params = json!([format!("0x{}", hex::encode(address.as_bytes())), "latest"]);
        let result = self.call("eth_getBalance", params).await?;
        decode_quantity(&result)
    }

    /// Chain id reported by the endpoint.
    pub async fn eth_chain_id(&self) -> Result<u64, ChainError> {
        let result = self.call("eth_chainId", json!([])).await?;
        let quantity = decode_quantity(&result)?;
        if quantity.bits() > 64 {
            return Err(ChainError::Parse("chain id out of range".into()));
        }
        Ok(quantity.low_u64())
    }
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(serde::Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(serde::Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

fn parse_rpc_response(text: &str) -> Result<Value, ChainError> {
    let response: RpcResponse = serde_json::from_str(text).map_err(|e| ChainError::Parse(e.to_string()))?;
    if let Some(error) = response.error {
        return Err(ChainError::Rpc { code: error.code, message: error.message });
    }
    response
        .result
        .ok_or_else(|| ChainError::Parse("response carries neither result nor error".into()))
}

/// Decode a `0x`-prefixed hex string value into raw bytes.
fn decode_hex_bytes(value: &Value) -> Result<Vec<u8>, ChainError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ChainError::Parse(format!("expected hex string, got {value}")))?;
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(stripped).map_err(|e| ChainError::Parse(e.to_string()))
}

/// Decode a `0x`-prefixed hex quantity into a `U256`.
fn decode_quantity(value: &Value) -> Result<U256, ChainError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ChainError::Parse(format!("expected hex quantity, got {value}")))?;
    let stripped = raw.strip_prefix("0x").unwrap_or(raw);
    U256::from_str_radix(stripped, 16).map_err(|e| ChainError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "rpc_test.rs"]
mod tests;
