//! Rounding helpers shared by the rate normalizer and the accrual engine.
//!
//! All presentation rounding is half-up (midpoint away from zero). Rounding
//! is applied when values are emitted, never to the running totals.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for every monetary figure in a result.
pub const MONEY_DP: u32 = 2;

/// Rounds `value` to `dp` decimal places, midpoint away from zero.
#[must_use]
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a monetary amount to cents and pins the scale to two digits,
/// so `1000` is presented as `1000.00`.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = round_half_up(value, MONEY_DP);
    rounded.rescale(MONEY_DP);
    rounded
}
