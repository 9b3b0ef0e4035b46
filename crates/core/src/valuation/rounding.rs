//! Whole-cent rounding.
//!
//! All rounding is half away from zero. Quotients are rounded from their exact
//! remainder so that repeating decimals such as 1066.666... never pick up an
//! error from a truncated intermediate value.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Rounds a cent amount to whole cents, half away from zero.
///
/// Saturates at the `i64` bounds.
#[must_use]
pub fn round_cents(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(if value.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
}

/// Rounds `numerator / denominator` to whole cents, half away from zero.
///
/// Returns 0 when the denominator is zero. Quotients beyond the `i64`
/// range saturate.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use stockval_core::valuation::rounding::divide_round;
///
/// // 160000 / 150 = 1066.67 -> 1067
/// assert_eq!(divide_round(dec!(160000), dec!(150)), 1067);
/// ```
#[must_use]
pub fn divide_round(numerator: Decimal, denominator: Decimal) -> i64 {
    if denominator.is_zero() {
        return 0;
    }

    let positive = numerator.is_sign_negative() == denominator.is_sign_negative();
    let saturated = if positive { i64::MAX } else { i64::MIN };

    let Some(remainder) = numerator.checked_rem(denominator) else {
        // The remainder cannot be rescaled; fall back to the 28-digit quotient.
        return numerator
            .checked_div(denominator)
            .map_or(saturated, round_cents);
    };
    let Some(quotient) = (numerator - remainder).checked_div(denominator) else {
        return saturated;
    };

    // |remainder / denominator| >= 1/2 rounds away from zero.
    let step = if remainder.abs() >= denominator.abs() - remainder.abs() {
        if positive {
            Decimal::ONE
        } else {
            Decimal::NEGATIVE_ONE
        }
    } else {
        Decimal::ZERO
    };

    round_cents(quotient.saturating_add(step))
}
