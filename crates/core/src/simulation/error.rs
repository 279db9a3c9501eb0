//! Simulation error types.

use thiserror::Error;

/// Simulation-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// An argument the engine cannot interpret, e.g. an unknown rate type.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A running total left the range `Decimal` can represent.
    #[error("Projection exceeds the supported numeric range at month {month}")]
    Overflow {
        /// Month being computed when the overflow occurred.
        month: u32,
    },
}

impl SimulationError {
    /// Error for an interest rate type tag that is neither annual nor monthly.
    #[must_use]
    pub fn unknown_rate_type(tag: &str) -> Self {
        Self::InvalidArgument(format!("unrecognized interest rate type '{tag}'"))
    }
}
