//! Fixed-point price utilities.
//!
//! Offer bounds and settlement prices are `u64` values scaled by 10^8, so the
//! engine compares and averages integers only. `rust_decimal` is used at the
//! edges to parse and render human-readable prices.
//!
//! ## Examples
//!
//! ```
//! use offer_market::types::price::{to_fixed, from_fixed_trimmed, midpoint};
//!
//! let sell_min = to_fixed("10.0").unwrap();
//! let buy_max = to_fixed("12.0").unwrap();
//! assert_eq!(from_fixed_trimmed(midpoint(buy_max, sell_min)), "11");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8
pub const SCALE: u64 = 100_000_000;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Parse a decimal string into a fixed-point price.
///
/// Returns `None` for unparseable, negative, or out-of-range input.
///
/// ```
/// use offer_market::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to a fixed-point price, rounding to 8 places.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert a fixed-point price to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Render a fixed-point price without trailing zeros
///
/// ```
/// use offer_market::types::price::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(1_100_000_000), "11");
/// assert_eq!(from_fixed_trimmed(150_000_000), "1.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    format!("{}", fixed_to_decimal(value).normalize())
}

// ============================================================================
// Settlement
// ============================================================================

/// Arithmetic midpoint of two fixed-point prices.
///
/// Computed in `u128` so it cannot overflow; an odd sum rounds down by one
/// unit of 10^-8. The result always lies in `[min(a, b), max(a, b)]`.
#[inline]
pub fn midpoint(a: u64, b: u64) -> u64 {
    ((a as u128 + b as u128) / 2) as u64
}
