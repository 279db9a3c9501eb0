//! Simulation request body and its validation.
//!
//! Both routes accept the same body. The untaxed route validates it
//! strictly; the taxed route only insists on what the calculation cannot do
//! without.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::str::FromStr;

use accrual_core::simulation::{SimulationKind, SimulationParams};

/// Field name to message, serialized as the body of a 400 response.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// A numeric field sent either as a JSON number or as a string.
///
/// Any other JSON value is kept so validation can name the field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    /// `12.5`
    Number(serde_json::Number),
    /// `"12.5"`
    Text(String),
    /// `true`, `[1]`, `{}`
    Other(serde_json::Value),
}

impl NumericField {
    /// Parses the value. `None` for an empty string, `Err` for garbage.
    fn to_decimal(&self) -> Result<Option<Decimal>, ()> {
        let text = match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) if s.trim().is_empty() => return Ok(None),
            Self::Text(s) => s.trim().to_string(),
            Self::Other(_) => return Err(()),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map(Some)
            .map_err(|_| ())
    }
}

/// Request body for both simulation routes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    /// Initial deposit.
    #[serde(default)]
    pub initial_amount: Option<NumericField>,
    /// Monthly contribution, zero when absent.
    #[serde(default)]
    pub monthly_contribution: Option<NumericField>,
    /// Interest rate as a percentage.
    #[serde(default)]
    pub interest_rate: Option<NumericField>,
    /// "annual"/"anual" or "monthly"/"mensal".
    #[serde(default)]
    pub interest_rate_type: Option<String>,
    /// Horizon length.
    #[serde(default)]
    pub investment_time: Option<NumericField>,
    /// Horizon unit tag.
    #[serde(default)]
    pub investment_time_unit: Option<String>,
}

impl SimulationRequest {
    /// Validates the body for the given route and converts it into engine
    /// parameters.
    pub fn into_params(self, kind: SimulationKind) -> Result<SimulationParams, FieldErrors> {
        let strict = kind == SimulationKind::Untaxed;
        let mut check = FieldCheck::default();

        let initial_amount = check.decimal(
            "initialAmount",
            "Initial amount",
            self.initial_amount.as_ref(),
        );
        let monthly_contribution = check.decimal(
            "monthlyContribution",
            "Monthly contribution",
            self.monthly_contribution.as_ref(),
        );
        let interest_rate =
            check.decimal("interestRate", "Interest rate", self.interest_rate.as_ref());
        let investment_time = check.whole(
            "investmentTime",
            "Investment time",
            self.investment_time.as_ref(),
        );
        let interest_rate_type = non_blank(self.interest_rate_type);
        let investment_time_unit = non_blank(self.investment_time_unit);

        if strict {
            match initial_amount {
                Some(v) if v <= Decimal::ZERO => check.fail(
                    "initialAmount",
                    "Initial amount must be a positive number.",
                ),
                None => check.fail("initialAmount", "Initial amount is required."),
                Some(_) => {}
            }
            if monthly_contribution.is_some_and(|v| v < Decimal::ZERO) {
                check.fail(
                    "monthlyContribution",
                    "Monthly contribution must be a positive number or zero.",
                );
            }
            if interest_rate.is_some_and(|v| v <= Decimal::ZERO) {
                check.fail("interestRate", "Interest rate must be a positive number.");
            }
            match investment_time {
                Some(0) => check.fail(
                    "investmentTime",
                    "Investment time must be a positive number.",
                ),
                None => check.fail("investmentTime", "Investment time is required."),
                Some(_) => {}
            }
            if investment_time_unit.is_none() {
                check.fail("investmentTimeUnit", "Investment time unit is required.");
            }
        }

        if interest_rate.is_none() {
            check.fail("interestRate", "Interest rate is required.");
        }
        if interest_rate_type.is_none() {
            check.fail("interestRateType", "Interest rate type is required.");
        }

        match (interest_rate, interest_rate_type) {
            (Some(interest_rate), Some(interest_rate_type)) if check.errors.is_empty() => {
                Ok(SimulationParams {
                    initial_amount,
                    monthly_contribution,
                    interest_rate,
                    interest_rate_type,
                    investment_time: investment_time.unwrap_or(0),
                    investment_time_unit: investment_time_unit.unwrap_or_default(),
                })
            }
            _ => Err(check.errors),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Collects the first error reported for each field.
#[derive(Default)]
struct FieldCheck {
    errors: FieldErrors,
}

impl FieldCheck {
    /// Keeps the earlier message when a field fails twice, so a parse error
    /// is not replaced by "is required".
    fn fail(&mut self, field: &'static str, message: &str) {
        self.errors
            .entry(field)
            .or_insert_with(|| message.to_string());
    }

    fn decimal(
        &mut self,
        field: &'static str,
        label: &str,
        value: Option<&NumericField>,
    ) -> Option<Decimal> {
        match value.map(NumericField::to_decimal) {
            Some(Ok(parsed)) => parsed,
            Some(Err(())) => {
                self.fail(field, &format!("{label} must be a number."));
                None
            }
            None => None,
        }
    }

    fn whole(
        &mut self,
        field: &'static str,
        label: &str,
        value: Option<&NumericField>,
    ) -> Option<u32> {
        let parsed = self.decimal(field, label, value)?;
        match parsed.to_u32() {
            Some(whole) if parsed.fract().is_zero() => Some(whole),
            _ => {
                self.fail(field, &format!("{label} must be a whole number."));
                None
            }
        }
    }
}
