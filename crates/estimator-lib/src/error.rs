//! Error types for the estimation engine

use thiserror::Error;

/// Errors raised by a single estimation run.
///
/// All variants are terminal: the engine is deterministic, so retrying with
/// the same snapshot reproduces the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("division by zero: {0} is zero")]
    DivisionByZero(&'static str),

    #[error("ROI is undefined because the estimated remediation cost is zero")]
    UndefinedRoi,

    #[error("payback period is undefined because the risk reduction is zero")]
    UndefinedPayback,
}

impl EstimationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Stable identifier used in API error bodies and metric labels
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::DivisionByZero(_) => "division_by_zero",
            Self::UndefinedRoi => "undefined_roi",
            Self::UndefinedPayback => "undefined_payback",
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimationError>;
