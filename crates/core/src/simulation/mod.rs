//! Compound-interest projections.

pub mod engine;
pub mod error;
pub mod rate;
pub mod rounding;
pub mod tax;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::SimulationEngine;
pub use error::SimulationError;
pub use rate::{normalize, normalize_tagged};
pub use tax::resolve_tax_rate;
pub use types::{
    InterestRateType, InvestmentTimeUnit, MonthlyEntry, SimulationKind, SimulationParams,
    SimulationResult, TaxSummary, YearTokens,
};
