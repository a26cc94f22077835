//! # Unit Conversion
//!
//! Conversion between the ledger's smallest unit and the human display unit.
//! The ledger uses a fixed-point scale of 18 fractional digits.
//!
//! Two paths exist on purpose:
//!
//! - the **exact string path** (`format_display` / `parse_display`), which
//!   round-trips every representable amount, and
//! - the **tolerant f64 path** (`to_display`), which feeds display-only
//!   consumers and collapses to `0.0` instead of failing.

use crate::errors::ClientError;
use primitive_types::U256;

/// Fractional digits below the display unit.
pub const DECIMALS: u32 = 18;

/// Smallest units per display unit (`10^18`).
pub fn unit_scale() -> U256 {
    U256::exp10(DECIMALS as usize)
}

/// Convert a smallest-unit amount to a display-unit `f64`.
///
/// Tolerant by contract: an amount whose whole part exceeds the f64-safe
/// range yields `0.0` rather than an error, since this path only feeds
/// rendering and statistics.
pub fn to_display(amount: U256) -> f64 {
    let scale = unit_scale();
    let whole = amount / scale;
    let frac = amount % scale;
    if whole.bits() > 128 {
        return 0.0;
    }
    whole.as_u128() as f64 + frac.as_u64() as f64 / 1e18
}

/// Render a smallest-unit amount as a canonical decimal string.
///
/// No trailing zeros and no trailing dot, so
/// `parse_display(format_display(x)) == x` holds for every `U256`.
pub fn format_display(amount: U256) -> String {
    let scale = unit_scale();
    let whole = amount / scale;
    // The remainder is below 10^18 and therefore fits in a u64.
    let frac = (amount % scale).as_u64();
    if frac == 0 {
        whole.to_string()
    } else {
        let digits = format!("{frac:018}");
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// Parse a display-unit decimal string into a smallest-unit amount.
///
/// The empty string parses to zero (the additive identity). Inputs with
/// more than 18 fractional digits, non-digit characters, or a value beyond
/// the `U256` range are rejected with [`ClientError::ValidationFailure`].
pub fn parse_display(input: &str) -> Result<U256, ClientError> {
    let s = input.trim();
    if s.is_empty() {
        return Ok(U256::zero());
    }

    let malformed =
        || ClientError::ValidationFailure(format!("malformed decimal amount: {input:?}"));

    let (whole_str, frac_str) = match s.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (s, ""),
    };
    if whole_str.is_empty() && frac_str.is_empty() {
        return Err(malformed());
    }
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole_str) || !all_digits(frac_str) {
        return Err(malformed());
    }
    if frac_str.len() > DECIMALS as usize {
        return Err(ClientError::ValidationFailure(format!(
            "more than {DECIMALS} fractional digits: {input:?}"
        )));
    }

    let whole = if whole_str.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole_str).map_err(|_| malformed())?
    };
    let mut padded = frac_str.to_string();
    while padded.len() < DECIMALS as usize {
        padded.push('0');
    }
    let frac: u64 = padded.parse().map_err(|_| malformed())?;

    whole
        .checked_mul(unit_scale())
        .and_then(|scaled| scaled.checked_add(U256::from(frac)))
        .ok_or_else(|| ClientError::ValidationFailure(format!("amount out of range: {input:?}")))
}
