//! Wei / ether conversions.  Everything that feeds a transaction stays in
//! integer wei; the only floating point here is [`ether_to_f64`], which
//! exists for report totals.
use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::U256;

use crate::constants::{ETHER_DECIMALS, GWEI_DECIMALS, WEI_PER_ETHER};
use crate::error::{ConsoleError, Result};

/// Render a wei amount as an exact ether string with trailing zeros
/// removed: `1_500_000_000_000_000_000` -> `"1.5"`, `0` -> `"0"`.
pub fn from_wei(wei: U256) -> String {
    let scale = U256::from(WEI_PER_ETHER);
    let whole = wei / scale;
    let frac = wei % scale;

    if frac.is_zero() {
        return format!("{whole}");
    }
    // frac < 10^18 always fits
    let frac: u64 = frac.try_into().unwrap_or_default();
    let mut frac_str = format!("{:0width$}", frac, width = ETHER_DECIMALS as usize);
    while frac_str.ends_with('0') {
        frac_str.pop();
    }
    format!("{whole}.{frac_str}")
}

/// Parse a non-negative decimal ether amount into wei.
pub fn to_wei(amount: &str) -> Result<U256> {
    parse_decimal(amount, ETHER_DECIMALS)
}

/// Parse a non-negative decimal ether amount into gwei, truncating
/// anything below one gwei.
pub fn ether_to_gwei(amount: &str) -> Result<U256> {
    let wei = to_wei(amount)?;
    Ok(wei / U256::from(10u64.pow(GWEI_DECIMALS as u32)))
}

/// Report-path accumulator value for an already converted ether string.
/// Lossy for large balances.
pub fn ether_to_f64(ether: &str) -> Result<f64> {
    ether
        .trim()
        .parse::<f64>()
        .map_err(|_| ConsoleError::InvalidAmount(ether.to_string()))
}

/// Decode a JSON-RPC quantity.  Accepts `0x`-prefixed hex of any length
/// up to 32 bytes ("0x0", "0x1", "0xde0b6b3a7640000") and plain decimal.
pub fn parse_quantity(raw: &str) -> Result<U256> {
    let raw = raw.trim();
    let Some(mut s) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) else {
        return U256::from_str_radix(raw, 10).map_err(|_| ConsoleError::InvalidAmount(raw.into()));
    };

    // "0x" alone is how some nodes spell zero
    if s.is_empty() {
        return Ok(U256::ZERO);
    }

    // pad to even length, because RPC can return "0x0" or "0x1"
    let padded;
    if s.len() % 2 == 1 {
        padded = format!("0{s}");
        s = &padded;
    }

    let bytes = hex::decode(s).map_err(|_| ConsoleError::InvalidAmount(raw.into()))?;
    if bytes.len() > 32 {
        return Err(ConsoleError::InvalidAmount(raw.into()));
    }
    Ok(U256::from_be_slice(&bytes))
}

fn parse_decimal(amount: &str, decimals: u8) -> Result<U256> {
    let invalid = || ConsoleError::InvalidAmount(amount.to_string());
    let trimmed = amount.trim();

    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if frac.len() > decimals as usize {
        return Err(invalid());
    }

    let normalized = match (whole.is_empty(), frac.is_empty()) {
        (true, _) => format!("0.{frac}"),
        (false, true) => whole.to_string(),
        (false, false) => format!("{whole}.{frac}"),
    };

    match parse_units(&normalized, decimals).map_err(|_| invalid())? {
        ParseUnits::U256(v) => Ok(v),
        ParseUnits::I256(_) => Err(invalid()),
    }
}
