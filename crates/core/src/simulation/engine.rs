//! Simulation engine for running compound-interest projections.

use rust_decimal::Decimal;

use super::error::SimulationError;
use super::rate;
use super::rounding::round_money;
use super::tax::resolve_tax_rate;
use super::types::{
    MonthlyEntry, SimulationKind, SimulationParams, SimulationResult, TaxSummary, YearTokens,
};

/// Engine for running compound-interest simulations.
///
/// Holds only the per-operation unit vocabulary; every run is independent.
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    untaxed_years: YearTokens,
    taxed_years: YearTokens,
}

impl SimulationEngine {
    /// Creates an engine with the default "years" tags for both operations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with explicit "years" tags per operation.
    #[must_use]
    pub fn with_year_tokens(untaxed_years: YearTokens, taxed_years: YearTokens) -> Self {
        Self {
            untaxed_years,
            taxed_years,
        }
    }

    /// Tags read as "years" by the given operation.
    #[must_use]
    pub fn year_tokens(&self, kind: SimulationKind) -> &YearTokens {
        match kind {
            SimulationKind::Untaxed => &self.untaxed_years,
            SimulationKind::Taxed => &self.taxed_years,
        }
    }

    /// Number of months the given operation would simulate for `params`.
    #[must_use]
    pub fn horizon_months(&self, kind: SimulationKind, params: &SimulationParams) -> u32 {
        self.year_tokens(kind)
            .resolve(&params.investment_time_unit)
            .to_months(params.investment_time)
    }

    /// Runs the given operation.
    pub fn run(
        &self,
        kind: SimulationKind,
        params: &SimulationParams,
    ) -> Result<SimulationResult, SimulationError> {
        match kind {
            SimulationKind::Untaxed => self.simulate(params),
            SimulationKind::Taxed => self.simulate_with_tax(params),
        }
    }

    /// Runs the untaxed projection.
    ///
    /// The ledger opens with a month-zero row valuing the initial deposit
    /// after one month of interest, then one row per simulated month.
    pub fn simulate(&self, params: &SimulationParams) -> Result<SimulationResult, SimulationError> {
        let monthly_rate = rate::normalize_tagged(params.interest_rate, &params.interest_rate_type)?;
        let total_months = self.horizon_months(SimulationKind::Untaxed, params);

        let mut accrual = Accrual::new(
            params.initial_amount_or_zero(),
            params.monthly_contribution_or_zero(),
            monthly_rate,
        );
        accrual.month_zero()?;
        accrual.run_months(total_months)?;

        Ok(SimulationResult {
            final_total_amount: round_money(accrual.balance),
            total_invested_amount: round_money(accrual.invested),
            total_interest_earned: round_money(accrual.interest_total),
            monthly_data: accrual.ledger,
            tax: None,
        })
    }

    /// Runs the taxed projection.
    ///
    /// The ledger starts at month one. Tax is charged on gross interest and
    /// only reduces the reported final amount; the reported interest stays
    /// gross.
    pub fn simulate_with_tax(
        &self,
        params: &SimulationParams,
    ) -> Result<SimulationResult, SimulationError> {
        let monthly_rate = rate::normalize_tagged(params.interest_rate, &params.interest_rate_type)?;
        let total_months = self.horizon_months(SimulationKind::Taxed, params);

        let mut accrual = Accrual::new(
            params.initial_amount_or_zero(),
            params.monthly_contribution_or_zero(),
            monthly_rate,
        );
        accrual.run_months(total_months)?;

        let tax_rate = resolve_tax_rate(total_months);
        let tax_on_profit = checked(accrual.interest_total.checked_mul(tax_rate), total_months)?;
        let net_profit = checked(
            accrual.interest_total.checked_sub(tax_on_profit),
            total_months,
        )?;
        let final_amount = checked(accrual.invested.checked_add(net_profit), total_months)?;

        Ok(SimulationResult {
            final_total_amount: round_money(final_amount),
            total_invested_amount: round_money(accrual.invested),
            total_interest_earned: round_money(accrual.interest_total),
            monthly_data: accrual.ledger,
            tax: Some(TaxSummary {
                tax_rate,
                tax_on_profit: round_money(tax_on_profit),
                net_profit: round_money(net_profit),
            }),
        })
    }
}

/// Unwraps a checked `Decimal` operation, reporting the month on overflow.
fn checked(value: Option<Decimal>, month: u32) -> Result<Decimal, SimulationError> {
    value.ok_or(SimulationError::Overflow { month })
}

/// Running state of one projection. Totals keep full precision; only the
/// emitted ledger rows are rounded.
struct Accrual {
    balance: Decimal,
    invested: Decimal,
    interest_total: Decimal,
    contribution: Decimal,
    monthly_rate: Decimal,
    ledger: Vec<MonthlyEntry>,
}

impl Accrual {
    fn new(initial_amount: Decimal, contribution: Decimal, monthly_rate: Decimal) -> Self {
        Self {
            balance: initial_amount,
            invested: initial_amount,
            interest_total: Decimal::ZERO,
            contribution,
            monthly_rate,
            ledger: Vec::new(),
        }
    }

    /// Interest on the initial deposit alone, recorded as month 0.
    fn month_zero(&mut self) -> Result<(), SimulationError> {
        self.accrue_interest(0)
    }

    /// Contribution first, then interest on the post-contribution balance.
    fn run_months(&mut self, total_months: u32) -> Result<(), SimulationError> {
        for month in 1..=total_months {
            self.balance = checked(self.balance.checked_add(self.contribution), month)?;
            self.invested = checked(self.invested.checked_add(self.contribution), month)?;
            self.accrue_interest(month)?;
        }
        Ok(())
    }

    fn accrue_interest(&mut self, month: u32) -> Result<(), SimulationError> {
        let interest = checked(self.balance.checked_mul(self.monthly_rate), month)?;
        self.balance = checked(self.balance.checked_add(interest), month)?;
        self.interest_total = checked(self.interest_total.checked_add(interest), month)?;
        self.record(month, interest);
        Ok(())
    }

    fn record(&mut self, month: u32, interest: Decimal) {
        self.ledger.push(MonthlyEntry {
            month,
            interest_accrued: round_money(interest),
            cumulative_invested: round_money(self.invested),
            cumulative_interest: round_money(self.interest_total),
            total_accumulated: round_money(self.balance),
        });
    }
}
