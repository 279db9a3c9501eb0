//! Property-based tests for simulation module.

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::engine::SimulationEngine;
use super::rate::normalize;
use super::tax::resolve_tax_rate;
use super::types::{InterestRateType, SimulationKind, SimulationParams};

/// Strategy for an amount from 0.00 to 100,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a percentage rate from 0.01 to 5.00.
fn monthly_percent() -> impl Strategy<Value = Decimal> {
    (1i64..=500).prop_map(|bps| Decimal::new(bps, 2))
}

fn rate_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("monthly"), Just("annual")]
}

fn kind() -> impl Strategy<Value = SimulationKind> {
    prop_oneof![Just(SimulationKind::Untaxed), Just(SimulationKind::Taxed)]
}

fn build_params(
    initial: Decimal,
    contribution: Decimal,
    rate: Decimal,
    rate_type: &str,
    months: u32,
) -> SimulationParams {
    SimulationParams {
        initial_amount: Some(initial),
        monthly_contribution: Some(contribution),
        interest_rate: rate,
        interest_rate_type: rate_type.to_string(),
        investment_time: months,
        investment_time_unit: "months".to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Cumulative invested never decreases along the ledger.
    #[test]
    fn prop_invested_is_monotonic(
        initial in amount(),
        contribution in amount(),
        rate in monthly_percent(),
        rate_type in rate_type(),
        months in 1u32..=120,
        kind in kind(),
    ) {
        let params = build_params(initial, contribution, rate, rate_type, months);
        let result = SimulationEngine::new().run(kind, &params).unwrap();

        for pair in result.monthly_data.windows(2) {
            prop_assert!(pair[0].cumulative_invested <= pair[1].cumulative_invested);
        }
    }

    /// Every row's balance is invested plus interest, within a cent.
    #[test]
    fn prop_balance_decomposition(
        initial in amount(),
        contribution in amount(),
        rate in monthly_percent(),
        rate_type in rate_type(),
        months in 1u32..=120,
        kind in kind(),
    ) {
        let params = build_params(initial, contribution, rate, rate_type, months);
        let result = SimulationEngine::new().run(kind, &params).unwrap();

        for entry in &result.monthly_data {
            let diff = (entry.total_accumulated
                - (entry.cumulative_invested + entry.cumulative_interest))
                .abs();
            prop_assert!(diff <= dec!(0.01), "row {} off by {}", entry.month, diff);
        }
    }

    /// Ledger length is the horizon, plus month zero for the untaxed run.
    #[test]
    fn prop_ledger_length(
        months in 1u32..=240,
        kind in kind(),
    ) {
        let params = build_params(dec!(100), dec!(10), dec!(1), "monthly", months);
        let result = SimulationEngine::new().run(kind, &params).unwrap();

        let expected = match kind {
            SimulationKind::Untaxed => months as usize + 1,
            SimulationKind::Taxed => months as usize,
        };
        prop_assert_eq!(result.monthly_data.len(), expected);
        prop_assert_eq!(result.monthly_data.last().unwrap().month, months);
    }

    /// Total invested is the initial amount plus one contribution per month.
    #[test]
    fn prop_total_invested(
        initial in amount(),
        contribution in amount(),
        months in 1u32..=120,
        kind in kind(),
    ) {
        let params = build_params(initial, contribution, dec!(0.5), "monthly", months);
        let result = SimulationEngine::new().run(kind, &params).unwrap();

        let mut expected = initial + contribution * Decimal::from(months);
        expected.rescale(2);
        prop_assert_eq!(result.total_invested_amount, expected);
    }

    /// A monthly rate of X normalizes to X / 100 rounded half-up at four
    /// places, and normalizing the result again changes nothing.
    #[test]
    fn prop_monthly_rate_idempotence(units in 1i64..100_000_000) {
        let rate = Decimal::new(units, 5);
        let normalized = normalize(rate, InterestRateType::Monthly).unwrap();
        let expected = (rate / dec!(100))
            .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);

        prop_assert_eq!(normalized, expected);
        prop_assert!(normalized.scale() <= 4);

        let again = normalize(normalized * dec!(100), InterestRateType::Monthly).unwrap();
        prop_assert_eq!(again, normalized);
    }

    /// A higher annual rate gives a higher monthly multiplier.
    #[test]
    fn prop_annual_conversion_is_increasing(
        low in 1i64..5_000,
        step in 10i64..1_000,
    ) {
        let low_rate = Decimal::new(low, 2);
        let high_rate = Decimal::new(low + step, 2);
        let low_monthly = normalize(low_rate, InterestRateType::Annual).unwrap();
        let high_monthly = normalize(high_rate, InterestRateType::Annual).unwrap();

        prop_assert!(low_monthly > Decimal::ZERO);
        prop_assert!(high_monthly > low_monthly);
        // the compounded monthly rate is below a simple twelfth
        prop_assert!(low_monthly * dec!(12) <= low_rate / dec!(100) + dec!(0.000000001));
    }

    /// Reported gross interest is unaffected by tax; the final amount is.
    #[test]
    fn prop_tax_only_reduces_final_amount(
        initial in (100_00i64..10_000_000).prop_map(|c| Decimal::new(c, 2)),
        rate in monthly_percent(),
        months in 1u32..=60,
    ) {
        let params = build_params(initial, Decimal::ZERO, rate, "monthly", months);
        let result = SimulationEngine::new().simulate_with_tax(&params).unwrap();
        let tax = result.tax.clone().unwrap();

        prop_assert_eq!(tax.tax_rate, resolve_tax_rate(months));
        prop_assert!(result.final_total_amount <= result.total_invested_amount + result.total_interest_earned);
        let recomposed = result.total_invested_amount + tax.net_profit;
        prop_assert!((recomposed - result.final_total_amount).abs() <= dec!(0.01));
    }
}
