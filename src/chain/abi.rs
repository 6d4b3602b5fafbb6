//! Hand-rolled subset of the Solidity ABI: 4-byte selectors, head/tail
//! argument encoding, and return-data decoding for the handful of value
//! shapes the readers and transaction builders use.

use ethereum_types::{H160, U256};
use sha3::{Digest, Keccak256};

use super::ChainError;

const WORD: usize = 32;

/// A single encodable call argument.
#[derive(Debug, Clone)]
pub enum Token {
    Address(H160),
    Uint(U256),
    Str(String),
}

impl Token {
    fn is_dynamic(&self) -> bool {
        matches!(self, Token::Str(_))
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// First four bytes of `keccak256(signature)`.
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Encode a full call: selector followed by ABI-encoded arguments.
#[must_use]
pub fn encode_call(signature: &str, args: &[Token]) -> Vec<u8> {
    let mut out = selector(signature).to_vec();
    out.extend_from_slice(&encode_args(args));
    out
}

/// Head/tail encoding: static arguments inline, dynamic arguments as offsets
/// into a tail section appended after the head.
fn encode_args(args: &[Token]) -> Vec<u8> {
    let head_len = WORD * args.len();
    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();

    for arg in args {
        if arg.is_dynamic() {
            head.extend_from_slice(&uint_word(U256::from(head_len + tail.len())));
            tail.extend_from_slice(&encode_tail(arg));
        } else {
            head.extend_from_slice(&static_word(arg));
        }
    }

    head.extend_from_slice(&tail);
    head
}

fn static_word(arg: &Token) -> [u8; WORD] {
    match arg {
        Token::Address(address) => {
            let mut word = [0u8; WORD];
            word[WORD - 20..].copy_from_slice(address.as_bytes());
            word
        }
        Token::Uint(value) => uint_word(*value),
        Token::Str(_) => unreachable!("dynamic tokens are tail-encoded"),
    }
}

fn encode_tail(arg: &Token) -> Vec<u8> {
    match arg {
        Token::Str(value) => {
            let bytes = value.as_bytes();
            let mut out = uint_word(U256::from(bytes.len())).to_vec();
            out.extend_from_slice(bytes);
            let padding = (WORD - bytes.len() % WORD) % WORD;
            out.extend(std::iter::repeat_n(0u8, padding));
            out
        }
        Token::Address(_) | Token::Uint(_) => unreachable!("static tokens are head-encoded"),
    }
}

fn uint_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

// =============================================================================
// DECODING
// =============================================================================

/// The `index`-th 32-byte word of return data.
pub(crate) fn word(data: &[u8], index: usize) -> Result<&[u8], ChainError> {
    let start = index * WORD;
    let end = start + WORD;
    if data.len() < end {
        return Err(ChainError::AbiDecode(format!(
            "return data too short: want word {index}, have {} bytes",
            data.len()
        )));
    }
    Ok(&data[start..end])
}

pub fn decode_uint(data: &[u8]) -> Result<U256, ChainError> {
    Ok(U256::from_big_endian(word(data, 0)?))
}

pub fn decode_bool(data: &[u8]) -> Result<bool, ChainError> {
    Ok(!decode_uint(data)?.is_zero())
}

pub fn decode_address(data: &[u8]) -> Result<H160, ChainError> {
    Ok(address_from_word(word(data, 0)?))
}

pub(crate) fn address_from_word(word: &[u8]) -> H160 {
    H160::from_slice(&word[WORD - 20..])
}

/// Decode a single dynamic `string` return value.
pub fn decode_string(data: &[u8]) -> Result<String, ChainError> {
    let offset = usize_from(decode_uint(data)?)?;
    let len = usize_from(U256::from_big_endian(word(data, offset / WORD)?))?;
    let start = offset + WORD;
    let end = start
        .checked_add(len)
        .ok_or_else(|| ChainError::AbiDecode("string length overflow".into()))?;
    if data.len() < end {
        return Err(ChainError::AbiDecode(format!(
            "string tail truncated: want {end} bytes, have {}",
            data.len()
        )));
    }
    String::from_utf8(data[start..end].to_vec()).map_err(|e| ChainError::AbiDecode(e.to_string()))
}

/// Decode a single dynamic `uint256[]` return value.
pub fn decode_uint_array(data: &[u8]) -> Result<Vec<U256>, ChainError> {
    let offset = usize_from(decode_uint(data)?)?;
    let len = usize_from(U256::from_big_endian(word(data, offset / WORD)?))?;
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        out.push(U256::from_big_endian(word(data, offset / WORD + 1 + i)?));
    }
    Ok(out)
}

fn usize_from(value: U256) -> Result<usize, ChainError> {
    if value.bits() > 64 {
        return Err(ChainError::AbiDecode(format!("value out of range: {value}")));
    }
    usize::try_from(value.low_u64()).map_err(|_| ChainError::AbiDecode(format!("value out of range: {value}")))
}

#[cfg(test)]
#[path = "abi_test.rs"]
mod tests;
