//! Conversion utilities.

use {
    num::{BigInt, BigRational, Zero},
    primitive_types::H160,
};

/// Parses a 20-byte hex address. The `0x` prefix is optional and letter case
/// is ignored.
pub fn parse_address(s: &str) -> Option<H160> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if digits.len() != 40 {
        return None;
    }
    let bytes = hex::decode(digits).ok()?;
    Some(H160::from_slice(&bytes))
}

/// Formats an address as lower-case `0x` prefixed hex.
pub fn format_address(address: &H160) -> String {
    format!("{address:#x}")
}

/// Scales a raw token amount down to whole units. Returns `None` for a zero
/// denominator.
pub fn to_whole_units(numer: &BigInt, denom: &BigInt, decimals: u8) -> Option<BigRational> {
    if denom.is_zero() {
        return None;
    }
    let scale = BigInt::from(10_u8).pow(u32::from(decimals));
    Some(BigRational::new(numer.clone(), denom * scale))
}
