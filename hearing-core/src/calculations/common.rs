//! Rounding and lenient number parsing shared by the calculators.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use hearing_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(12.344)), dec!(12.34));
/// assert_eq!(round_half_up(dec!(12.345)), dec!(12.35));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Parses form text as a decimal.
///
/// Accepts plain (`"1250.50"`) and scientific (`"1e3"`) notation after
/// trimming whitespace. Returns `None` for empty or non-numeric text.
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Truncates a non-negative decimal toward zero.
///
/// Returns `None` for negative values and values beyond `u64`.
pub fn whole_units(value: Decimal) -> Option<u64> {
    if value.is_sign_negative() && !value.is_zero() {
        return None;
    }
    value.trunc().to_u64()
}
