//! Transaction preparation for embedded-wallet write paths.
//!
//! Builders encode the marketplace's common operations into calldata; nothing
//! here is ever broadcast. Submission is a stub that hands back a pending
//! hash, standing in for the provider's transaction API.

use ethereum_types::{H160, U256};
use rand::Rng;
use tracing::info;

use crate::chain::abi::{Token, encode_call};

pub const DEFAULT_GAS_LIMIT: u64 = 100_000;

/// An unsigned contract call ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub to: H160,
    pub data: Vec<u8>,
    pub value: U256,
    pub gas_limit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResult {
    pub hash: String,
    pub status: TxStatus,
}

// =============================================================================
// BUILDERS
// =============================================================================

/// ERC-20 `transfer`.
#[must_use]
pub fn transfer_token(token: H160, to: H160, amount: U256) -> TransactionRequest {
    TransactionRequest {
        to: token,
        data: encode_call("transfer(address,uint256)", &[Token::Address(to), Token::Uint(amount)]),
        value: U256::zero(),
        gas_limit: 100_000,
    }
}

/// ERC-20 `approve`.
#[must_use]
pub fn approve_token(token: H160, spender: H160, amount: U256) -> TransactionRequest {
    TransactionRequest {
        to: token,
        data: encode_call("approve(address,uint256)", &[Token::Address(spender), Token::Uint(amount)]),
        value: U256::zero(),
        gas_limit: 100_000,
    }
}

/// NFT mint with a token URI.
#[must_use]
pub fn mint_nft(collection: H160, to: H160, token_uri: &str) -> TransactionRequest {
    TransactionRequest {
        to: collection,
        data: encode_call("mint(address,string)", &[Token::Address(to), Token::Str(token_uri.to_owned())]),
        value: U256::zero(),
        gas_limit: 200_000,
    }
}

/// NFT `transferFrom`.
#[must_use]
pub fn transfer_nft(collection: H160, from: H160, to: H160, token_id: U256) -> TransactionRequest {
    TransactionRequest {
        to: collection,
        data: encode_call(
            "transferFrom(address,address,uint256)",
            &[Token::Address(from), Token::Address(to), Token::Uint(token_id)],
        ),
        value: U256::zero(),
        gas_limit: 150_000,
    }
}

/// Marketplace listing creation.
#[must_use]
pub fn create_listing(marketplace: H160, collection: H160, token_id: U256, price: U256) -> TransactionRequest {
    TransactionRequest {
        to: marketplace,
        data: encode_call(
            "createListing(address,uint256,uint256)",
            &[Token::Address(collection), Token::Uint(token_id), Token::Uint(price)],
        ),
        value: U256::zero(),
        gas_limit: 200_000,
    }
}

/// Marketplace purchase; the price rides along as call value.
#[must_use]
pub fn purchase_listing(marketplace: H160, listing_id: U256, price: U256) -> TransactionRequest {
    TransactionRequest {
        to: marketplace,
        data: encode_call("purchaseListing(uint256)", &[Token::Uint(listing_id)]),
        value: price,
        gas_limit: 250_000,
    }
}

/// Arbitrary calldata escape hatch.
#[must_use]
pub fn custom(to: H160, data: Vec<u8>, value: U256, gas_limit: Option<u64>) -> TransactionRequest {
    TransactionRequest { to, data, value, gas_limit: gas_limit.unwrap_or(DEFAULT_GAS_LIMIT) }
}

// =============================================================================
// SUBMISSION (mocked)
// =============================================================================

fn random_tx_hash() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    format!("0x{}", hex::encode(bytes))
}

/// Hand a prepared transaction to the provider.
///
/// Stubbed: returns a pending hash without touching the network.
pub async fn submit(tx: &TransactionRequest) -> TransactionResult {
    info!(to = %format!("0x{}", hex::encode(tx.to.as_bytes())), data_len = tx.data.len(), "submitting transaction");
    TransactionResult { hash: random_tx_hash(), status: TxStatus::Pending }
}

/// Submit several transactions in order.
pub async fn submit_batch(txs: &[TransactionRequest]) -> Vec<TransactionResult> {
    let mut results = Vec::with_capacity(txs.len());
    for tx in txs {
        results.push(submit(tx).await);
    }
    results
}

/// Gas estimate for a prepared transaction.
///
/// Stubbed: echoes the request's own limit.
#[must_use]
pub fn estimate_gas(tx: &TransactionRequest) -> u64 {
    tx.gas_limit
}

#[cfg(test)]
#[path = "tx_test.rs"]
mod tests;
