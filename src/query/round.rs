//! Fixed two-decimal rounding for displayed averages

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Decimal places kept on average ratings
pub const RATING_DECIMALS: u32 = 2;

/// Round half away from zero on the shortest decimal form of `value`.
///
/// Working on the decimal form keeps `2.345` at `2.35` even though the
/// nearest `f64` sits just below the midpoint.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    // Outside Decimal's range there are no fractional digits left to round
    to_decimal(value)
        .and_then(|d| to_f64(round_decimal(d, decimals)))
        .unwrap_or(value)
}

pub fn round_rating(value: f64) -> f64 {
    round_half_up(value, RATING_DECIMALS)
}

/// Exact decimal for the shortest round-trip form of `value`
pub(crate) fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

/// Nearest `f64` to `value`
pub(crate) fn to_f64(value: Decimal) -> Option<f64> {
    f64::from_str(&value.to_string()).ok()
}

pub(crate) fn round_decimal(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}
