//! Display and parse helpers for token amounts and addresses.

use ethereum_types::{H160, U256};
use sha3::{Digest, Keccak256};

use super::ChainError;

pub const ETH_DECIMALS: u32 = 18;

// =============================================================================
// AMOUNTS
// =============================================================================

/// Format a raw token amount with the given number of decimals.
///
/// Trailing fractional zeros are trimmed: `1500000` at 6 decimals is `"1.5"`,
/// a whole amount renders without a fractional part.
#[must_use]
pub fn format_units(amount: U256, decimals: u32) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / scale;
    let frac = amount % scale;
    if frac.is_zero() {
        return whole.to_string();
    }

    let digits = frac.to_string();
    let mut frac = format!("{digits:0>width$}", width = decimals as usize);
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("{whole}.{frac}")
}

/// Parse a decimal string into a raw token amount.
///
/// # Errors
///
/// Rejects empty input, non-digit characters, and fractions with more digits
/// than the token carries.
pub fn parse_units(amount: &str, decimals: u32) -> Result<U256, ChainError> {
    let amount = amount.trim();
    let (whole, frac) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(ChainError::InvalidValue(format!("not a decimal amount: {amount:?}")));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(ChainError::InvalidValue(format!("not a decimal amount: {amount:?}")));
    }
    if frac.len() > decimals as usize {
        return Err(ChainError::InvalidValue(format!(
            "too many decimal places: {amount} (max {decimals})"
        )));
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|e| ChainError::InvalidValue(e.to_string()))?
    };
    let frac_scale = U256::from(10u64).pow(U256::from(decimals - u32::try_from(frac.len()).unwrap_or(0)));
    let frac = if frac.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(frac).map_err(|e| ChainError::InvalidValue(e.to_string()))?
    };

    whole
        .checked_mul(scale)
        .and_then(|w| frac.checked_mul(frac_scale).and_then(|f| w.checked_add(f)))
        .ok_or_else(|| ChainError::InvalidValue("amount overflows 256 bits".into()))
}

/// Format a wei amount as ETH.
#[must_use]
pub fn format_eth(amount: U256) -> String {
    format_units(amount, ETH_DECIMALS)
}

/// Parse an ETH amount into wei.
pub fn parse_eth(amount: &str) -> Result<U256, ChainError> {
    parse_units(amount, ETH_DECIMALS)
}

// =============================================================================
// ADDRESSES
// =============================================================================

/// Parse a `0x`-prefixed address, enforcing the EIP-55 checksum when the
/// input is mixed-case.
pub fn parse_address(raw: &str) -> Result<H160, ChainError> {
    let hex_part = raw
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::InvalidValue(format!("address missing 0x prefix: {raw}")))?;
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ChainError::InvalidValue(format!("not a 20-byte hex address: {raw}")));
    }

    let bytes = hex::decode(hex_part).map_err(|e| ChainError::InvalidValue(e.to_string()))?;
    let address = H160::from_slice(&bytes);

    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper && to_checksum(address) != raw {
        return Err(ChainError::InvalidValue(format!("bad EIP-55 checksum: {raw}")));
    }

    Ok(address)
}

#[must_use]
pub fn is_valid_address(raw: &str) -> bool {
    parse_address(raw).is_ok()
}

/// EIP-55 mixed-case checksum form of an address.
#[must_use]
pub fn to_checksum(address: H160) -> String {
    let lower = hex::encode(address.as_bytes());
    let digest = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (digest[i / 2] >> (4 * (1 - i % 2))) & 0xf;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Abbreviated display form: `0x` plus the first four and last four hex digits.
#[must_use]
pub fn short_address(raw: &str) -> Option<String> {
    if !is_valid_address(raw) {
        return None;
    }
    Some(format!("{}...{}", &raw[..6], &raw[raw.len() - 4..]))
}

#[cfg(test)]
#[path = "units_test.rs"]
mod tests;
