//! Unified error types for the TVM engine.
//!
//! Every failure is returned by value. Callers check the `Result` before
//! using a number; nothing in the engine panics on bad input.

use thiserror::Error;

use crate::config::ValidationError;

/// Unified error type for all TVM operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    // ========== Schedule Errors ==========
    /// `times` and `amounts` have different lengths
    #[error("length mismatch: {times} times but {amounts} amounts")]
    LengthMismatch {
        /// Number of cash-flow times supplied.
        times: usize,
        /// Number of cash-flow amounts supplied.
        amounts: usize,
    },

    /// Present value is zero (or not finite) where it is used as a denominator
    #[error("degenerate schedule: present value is zero in {context}")]
    DegenerateSchedule {
        /// Calculation that hit the zero denominator.
        context: String,
    },

    /// More than one sign change in the cash-flow amounts
    #[error("non-conventional schedule: {sign_changes} sign changes in cash flows")]
    NonConventionalSchedule {
        /// Number of sign changes found.
        sign_changes: usize,
    },

    // ========== Rate/Yield Errors ==========
    /// Discount rate outside the domain `(-1, ∞)`
    #[error("invalid rate {rate}: discount base 1 + rate must be positive and finite")]
    InvalidRate {
        /// The rejected rate.
        rate: f64,
    },

    /// Yield solver failed
    #[error("yield solver failed after {iterations} iterations: {reason}")]
    YieldSolverFailed {
        /// Number of iterations before failure.
        iterations: u32,
        /// Reason for failure.
        reason: String,
    },

    // ========== Configuration Errors ==========
    /// Configuration failed validation
    #[error("invalid configuration: {}", join_validation_errors(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// Configuration could not be parsed
    #[error("configuration parse error: {0}")]
    ConfigParse(String),

    // ========== General Errors ==========
    /// Invalid input parameter
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Math/solver error
    #[error("math error: {0}")]
    MathError(String),
}

/// Result type alias for TVM operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

impl From<tvm_math::MathError> for AnalyticsError {
    fn from(err: tvm_math::MathError) -> Self {
        AnalyticsError::MathError(err.to_string())
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        AnalyticsError::ConfigParse(err.to_string())
    }
}

fn join_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
