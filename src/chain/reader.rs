//! Typed contract readers over `eth_call`.
//!
//! One thin `Contract` seam owns the RPC client + target address; the ERC-20,
//! ERC-721, and marketplace readers layer call encoding and return decoding
//! on top. Nothing here mutates chain state.

use std::sync::Arc;

use ethereum_types::{H160, U256};

use super::abi::{self, Token};
use super::rpc::RpcClient;
use super::units::parse_address;
use super::{ChainError, ProviderCache};

// =============================================================================
// CONTRACT SEAM
// =============================================================================

/// A deployed contract on one network.
#[derive(Debug)]
pub struct Contract {
    rpc: Arc<RpcClient>,
    address: H160,
}

impl Contract {
    /// Bind a contract address on the given network.
    ///
    /// # Errors
    ///
    /// Fails on a malformed address or an unconfigured chain id.
    pub fn bind(providers: &ProviderCache, address: &str, chain_id: u64) -> Result<Self, ChainError> {
        Ok(Self { rpc: providers.provider(chain_id)?, address: parse_address(address)? })
    }

    #[must_use]
    pub fn address(&self) -> H160 {
        self.address
    }

    async fn call(&self, signature: &str, args: &[Token]) -> Result<Vec<u8>, ChainError> {
        self.rpc.eth_call(self.address, &abi::encode_call(signature, args)).await
    }
}

// =============================================================================
// ERC-20
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

pub struct Erc20Reader {
    contract: Contract,
}

impl Erc20Reader {
    pub fn bind(providers: &ProviderCache, address: &str, chain_id: u64) -> Result<Self, ChainError> {
        Ok(Self { contract: Contract::bind(providers, address, chain_id)? })
    }

    pub async fn balance_of(&self, owner: H160) -> Result<U256, ChainError> {
        let data = self.contract.call("balanceOf(address)", &[Token::Address(owner)]).await?;
        abi::decode_uint(&data)
    }

    pub async fn total_supply(&self) -> Result<U256, ChainError> {
        let data = self.contract.call("totalSupply()", &[]).await?;
        abi::decode_uint(&data)
    }

    /// Name, symbol, and decimals fetched concurrently.
    pub async fn metadata(&self) -> Result<TokenMetadata, ChainError> {
        let (name, symbol, decimals) = tokio::try_join!(
            self.contract.call("name()", &[]),
            self.contract.call("symbol()", &[]),
            self.contract.call("decimals()", &[]),
        )?;
        decode_token_metadata(&name, &symbol, &decimals)
    }
}

fn decode_token_metadata(name: &[u8], symbol: &[u8], decimals: &[u8]) -> Result<TokenMetadata, ChainError> {
    let decimals_value = abi::decode_uint(decimals)?;
    if decimals_value.bits() > 8 {
        return Err(ChainError::AbiDecode(format!("decimals out of range: {decimals_value}")));
    }
    let decimals = u8::try_from(decimals_value.low_u64())
        .map_err(|_| ChainError::AbiDecode(format!("decimals out of range: {decimals_value}")))?;
    Ok(TokenMetadata { name: abi::decode_string(name)?, symbol: abi::decode_string(symbol)?, decimals })
}

// =============================================================================
// ERC-721
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftMetadata {
    pub owner: H160,
    pub token_uri: String,
}

pub struct Erc721Reader {
    contract: Contract,
}

impl Erc721Reader {
    pub fn bind(providers: &ProviderCache, address: &str, chain_id: u64) -> Result<Self, ChainError> {
        Ok(Self { contract: Contract::bind(providers, address, chain_id)? })
    }

    pub async fn balance_of(&self, owner: H160) -> Result<U256, ChainError> {
        let data = self.contract.call("balanceOf(address)", &[Token::Address(owner)]).await?;
        abi::decode_uint(&data)
    }

    /// Owner and token URI fetched concurrently.
    pub async fn metadata(&self, token_id: U256) -> Result<NftMetadata, ChainError> {
        let owner_args = [Token::Uint(token_id)];
        let uri_args = [Token::Uint(token_id)];
        let (owner, token_uri) = tokio::try_join!(
            self.contract.call("ownerOf(uint256)", &owner_args),
            self.contract.call("tokenURI(uint256)", &uri_args),
        )?;
        Ok(NftMetadata { owner: abi::decode_address(&owner)?, token_uri: abi::decode_string(&token_uri)? })
    }
}

// =============================================================================
// MARKETPLACE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetails {
    pub seller: H160,
    pub price: U256,
    pub active: bool,
}

pub struct MarketplaceReader {
    contract: Contract,
}

impl MarketplaceReader {
    pub fn bind(providers: &ProviderCache, address: &str, chain_id: u64) -> Result<Self, ChainError> {
        Ok(Self { contract: Contract::bind(providers, address, chain_id)? })
    }

    /// All listing ids currently known to the marketplace.
    pub async fn listings(&self) -> Result<Vec<U256>, ChainError> {
        let data = self.contract.call("getListings()", &[]).await?;
        abi::decode_uint_array(&data)
    }

    pub async fn listing(&self, listing_id: U256) -> Result<ListingDetails, ChainError> {
        let data = self
            .contract
            .call("getListing(uint256)", &[Token::Uint(listing_id)])
            .await?;
        decode_listing(&data)
    }

    pub async fn listing_price(&self, listing_id: U256) -> Result<U256, ChainError> {
        let data = self
            .contract
            .call("getListingPrice(uint256)", &[Token::Uint(listing_id)])
            .await?;
        abi::decode_uint(&data)
    }
}

/// Decode the `(address seller, uint256 price, bool active)` tuple.
fn decode_listing(data: &[u8]) -> Result<ListingDetails, ChainError> {
    let seller = abi::address_from_word(abi::word(data, 0)?);
    let price = U256::from_big_endian(abi::word(data, 1)?);
    let active = abi::decode_bool(abi::word(data, 2)?)?;
    Ok(ListingDetails { seller, price, active })
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
