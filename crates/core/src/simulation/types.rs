//! Simulation data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::SimulationError;

/// Parameters for running a simulation.
///
/// One shape serves both operations. Amounts left as `None` are treated as
/// zero by the engine; whether they may be absent at all is decided by the
/// caller's validation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    /// Initial deposit.
    pub initial_amount: Option<Decimal>,
    /// Contribution added at the start of every month.
    pub monthly_contribution: Option<Decimal>,
    /// Interest rate as a percentage (12 means 12%).
    pub interest_rate: Decimal,
    /// Rate type tag, e.g. "annual" or "mensal".
    pub interest_rate_type: String,
    /// Horizon length in `investment_time_unit` units.
    pub investment_time: u32,
    /// Horizon unit tag, e.g. "years" or "meses".
    pub investment_time_unit: String,
}

impl SimulationParams {
    /// Initial deposit, zero when absent.
    #[must_use]
    pub fn initial_amount_or_zero(&self) -> Decimal {
        self.initial_amount.unwrap_or(Decimal::ZERO)
    }

    /// Monthly contribution, zero when absent.
    #[must_use]
    pub fn monthly_contribution_or_zero(&self) -> Decimal {
        self.monthly_contribution.unwrap_or(Decimal::ZERO)
    }
}

/// How the stated interest rate is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestRateType {
    /// Rate per year, compounded down to an effective monthly rate.
    Annual,
    /// Rate already stated per month.
    Monthly,
}

impl std::fmt::Display for InterestRateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Annual => write!(f, "annual"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for InterestRateType {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "annual" | "anual" => Ok(Self::Annual),
            "monthly" | "mensal" => Ok(Self::Monthly),
            _ => Err(SimulationError::unknown_rate_type(s)),
        }
    }
}

/// Unit of the investment horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentTimeUnit {
    /// One unit is one month.
    Months,
    /// One unit is twelve months.
    Years,
}

impl InvestmentTimeUnit {
    /// Number of months in `time` units, saturating at `u32::MAX`.
    #[must_use]
    pub const fn to_months(self, time: u32) -> u32 {
        match self {
            Self::Months => time,
            Self::Years => time.saturating_mul(12),
        }
    }
}

/// Case-insensitive set of tags that mean "years".
///
/// Every other tag resolves to months.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearTokens(Vec<String>);

impl YearTokens {
    /// Creates a token set from the given tags.
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// Resolves a unit tag to a time unit.
    #[must_use]
    pub fn resolve(&self, tag: &str) -> InvestmentTimeUnit {
        let tag = tag.trim().to_lowercase();
        if self.0.iter().any(|t| *t == tag) {
            InvestmentTimeUnit::Years
        } else {
            InvestmentTimeUnit::Months
        }
    }

    /// The accepted tags, lowercased.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.0
    }
}

impl Default for YearTokens {
    fn default() -> Self {
        Self::new(["years", "anos"])
    }
}

/// Which of the two operations is being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationKind {
    /// Ledger with a month-zero valuation, no tax.
    Untaxed,
    /// Ledger from month one, tax deducted from the final balance.
    Taxed,
}

impl std::fmt::Display for SimulationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Untaxed => write!(f, "untaxed"),
            Self::Taxed => write!(f, "taxed"),
        }
    }
}

/// One ledger row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyEntry {
    /// Month number (0 is the untaxed month-zero valuation).
    pub month: u32,
    /// Interest earned this month.
    #[serde(rename = "interest")]
    pub interest_accrued: Decimal,
    /// Initial amount plus all contributions so far.
    pub cumulative_invested: Decimal,
    /// All interest earned so far.
    pub cumulative_interest: Decimal,
    /// Balance after this month's contribution and interest.
    pub total_accumulated: Decimal,
}

/// Tax deducted by the taxed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummary {
    /// Rate from the duration tier.
    pub tax_rate: Decimal,
    /// Tax charged on gross interest.
    pub tax_on_profit: Decimal,
    /// Gross interest minus tax.
    pub net_profit: Decimal,
}

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Balance at the end of the horizon (after tax for the taxed operation).
    pub final_total_amount: Decimal,
    /// Initial amount plus all contributions.
    pub total_invested_amount: Decimal,
    /// Gross interest over the horizon.
    pub total_interest_earned: Decimal,
    /// Month-by-month ledger, ascending.
    pub monthly_data: Vec<MonthlyEntry>,
    /// Tax breakdown, only set by the taxed operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<TaxSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("annual", InterestRateType::Annual)]
    #[case(" Anual ", InterestRateType::Annual)]
    #[case("MONTHLY", InterestRateType::Monthly)]
    #[case("mensal", InterestRateType::Monthly)]
    fn test_rate_type_from_str(#[case] tag: &str, #[case] expected: InterestRateType) {
        assert_eq!(tag.parse::<InterestRateType>().unwrap(), expected);
    }

    #[test]
    fn test_rate_type_from_str_rejects_unknown() {
        assert!("".parse::<InterestRateType>().is_err());
        assert!("daily".parse::<InterestRateType>().is_err());
    }

    #[test]
    fn test_year_tokens_resolve() {
        let tokens = YearTokens::new(["Years", " anos ", ""]);
        assert_eq!(tokens.tokens(), ["years", "anos"]);
        assert_eq!(tokens.resolve("YEARS"), InvestmentTimeUnit::Years);
        assert_eq!(tokens.resolve("anos"), InvestmentTimeUnit::Years);
        assert_eq!(tokens.resolve("meses"), InvestmentTimeUnit::Months);
        assert_eq!(tokens.resolve(""), InvestmentTimeUnit::Months);
    }

    #[test]
    fn test_to_months_saturates() {
        assert_eq!(InvestmentTimeUnit::Years.to_months(3), 36);
        assert_eq!(InvestmentTimeUnit::Months.to_months(3), 3);
        assert_eq!(InvestmentTimeUnit::Years.to_months(u32::MAX), u32::MAX);
    }

    #[test]
    fn test_result_wire_format() {
        let result = SimulationResult {
            final_total_amount: dec!(1254.40),
            total_invested_amount: dec!(1000.00),
            total_interest_earned: dec!(254.40),
            monthly_data: vec![MonthlyEntry {
                month: 0,
                interest_accrued: dec!(120.00),
                cumulative_invested: dec!(1000.00),
                cumulative_interest: dec!(120.00),
                total_accumulated: dec!(1120.00),
            }],
            tax: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["finalTotalAmount"], "1254.40");
        assert_eq!(json["totalInvestedAmount"], "1000.00");
        assert_eq!(json["totalInterestEarned"], "254.40");
        assert_eq!(json["monthlyData"][0]["interest"], "120.00");
        assert_eq!(json["monthlyData"][0]["totalAccumulated"], "1120.00");
        assert!(json.get("tax").is_none());
    }

    #[test]
    fn test_params_deserialize_camel_case() {
        let params: SimulationParams = serde_json::from_str(
            r#"{
                "initialAmount": "1000",
                "interestRate": "12",
                "interestRateType": "mensal",
                "investmentTime": 2,
                "investmentTimeUnit": "anos"
            }"#,
        )
        .unwrap();

        assert_eq!(params.initial_amount, Some(dec!(1000)));
        assert_eq!(params.monthly_contribution, None);
        assert_eq!(params.monthly_contribution_or_zero(), Decimal::ZERO);
        assert_eq!(params.investment_time, 2);
    }
}
