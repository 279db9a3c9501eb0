//! Interest rate normalization.
//!
//! Converts a stated percentage rate into the effective monthly decimal
//! multiplier used by the accrual engine.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use super::error::SimulationError;
use super::rounding::round_half_up;
use super::types::InterestRateType;

/// Precision of a monthly rate derived from an annual one.
pub const ANNUAL_RATE_DP: u32 = 10;

/// Precision of a rate stated per month.
pub const MONTHLY_RATE_DP: u32 = 4;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Normalizes a percentage rate into an effective monthly multiplier.
pub fn normalize(rate: Decimal, rate_type: InterestRateType) -> Result<Decimal, SimulationError> {
    match rate_type {
        InterestRateType::Annual => annual_to_monthly(rate),
        InterestRateType::Monthly => Ok(round_half_up(
            rate / Decimal::ONE_HUNDRED,
            MONTHLY_RATE_DP,
        )),
    }
}

/// Parses the rate type tag, then normalizes.
pub fn normalize_tagged(rate: Decimal, rate_type: &str) -> Result<Decimal, SimulationError> {
    normalize(rate, rate_type.parse()?)
}

/// `(1 + r)^(1/12) - 1`, with `r` limited to 10 digits going in and the
/// result limited to 10 digits coming out.
fn annual_to_monthly(rate: Decimal) -> Result<Decimal, SimulationError> {
    let annual = round_half_up(rate / Decimal::ONE_HUNDRED, ANNUAL_RATE_DP);
    let growth = annual
        .checked_add(Decimal::ONE)
        .and_then(|g| g.to_f64())
        .ok_or_else(|| out_of_range(rate))?;

    let monthly = Decimal::from_f64(monthly_root(growth)).ok_or_else(|| out_of_range(rate))?;
    Ok(round_half_up(monthly, ANNUAL_RATE_DP))
}

// The only floating-point step in the crate: a fractional power has no
// exact decimal form.
#[allow(clippy::float_arithmetic)]
fn monthly_root(growth: f64) -> f64 {
    growth.powf(1.0 / MONTHS_PER_YEAR) - 1.0
}

fn out_of_range(rate: Decimal) -> SimulationError {
    SimulationError::InvalidArgument(format!(
        "annual interest rate {rate}% has no monthly equivalent"
    ))
}
