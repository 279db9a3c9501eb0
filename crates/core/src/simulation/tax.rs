//! Duration-tiered tax on investment income.
//!
//! The holding period is approximated as 30 days per month and looked up in
//! a regressive bracket table: the longer the holding, the lower the rate.

use rust_decimal::Decimal;

/// Days counted per simulated month.
pub const DAYS_PER_MONTH: u64 = 30;

/// A bracket that applies up to and including `max_days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxTier {
    /// Inclusive upper bound of the bracket, in days.
    pub max_days: u64,
    /// Rate charged on interest.
    pub rate: Decimal,
}

/// Brackets in ascending order; first match wins.
pub const TAX_TIERS: [TaxTier; 3] = [
    TaxTier {
        max_days: 180,
        rate: Decimal::from_parts(225, 0, 0, false, 3),
    },
    TaxTier {
        max_days: 360,
        rate: Decimal::from_parts(20, 0, 0, false, 2),
    },
    TaxTier {
        max_days: 720,
        rate: Decimal::from_parts(175, 0, 0, false, 3),
    },
];

/// Rate for holdings longer than every bracket.
pub const LONG_TERM_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Approximate holding period in days.
#[must_use]
pub fn holding_days(total_months: u32) -> u64 {
    u64::from(total_months) * DAYS_PER_MONTH
}

/// Resolves the tax rate for a horizon of `total_months`.
#[must_use]
pub fn resolve_tax_rate(total_months: u32) -> Decimal {
    let days = holding_days(total_months);
    TAX_TIERS
        .iter()
        .find(|tier| days <= tier.max_days)
        .map_or(LONG_TERM_RATE, |tier| tier.rate)
}
