//! Engine configuration.
//!
//! [`TvmConfig`] carries the yield-solver parameters and the strictness
//! switches. Every field has a serde default, so a partial JSON document
//! (or `{}`) gives the lenient defaults.

use serde::{Deserialize, Serialize};
use tvm_math::solvers::SolverConfig;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Absolute accuracy on present value used to accept a yield.
pub const YIELD_ACCURACY: f64 = 0.00005;

/// Maximum bisection iterations for a yield search.
pub const MAX_YIELD_ITERATIONS: u32 = 200;

/// Upper rate of the initial yield bracket `[0, 1]`.
pub const INITIAL_YIELD_UPPER_BOUND: f64 = 1.0;

/// Maximum doublings of the yield bracket before giving up.
pub const MAX_BRACKET_EXPANSIONS: u32 = 64;

// =============================================================================
// TVM CONFIGURATION
// =============================================================================

/// Configuration for yield and sensitivity calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TvmConfig {
    /// Absolute accuracy on present value when solving for a yield.
    #[serde(default = "default_yield_accuracy")]
    pub yield_accuracy: f64,

    /// Maximum bisection iterations for a yield search.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Upper rate of the initial yield bracket.
    #[serde(default = "default_initial_upper_bound")]
    pub initial_upper_bound: f64,

    /// Maximum doublings of the upper bound during bracket expansion.
    #[serde(default = "default_max_bracket_expansions")]
    pub max_bracket_expansions: u32,

    /// Fail with an error instead of returning a best-effort yield.
    #[serde(default)]
    pub require_convergence: bool,

    /// Reject schedules with more than one sign change before solving.
    #[serde(default)]
    pub require_conventional: bool,
}

fn default_yield_accuracy() -> f64 {
    YIELD_ACCURACY
}

fn default_max_iterations() -> u32 {
    MAX_YIELD_ITERATIONS
}

fn default_initial_upper_bound() -> f64 {
    INITIAL_YIELD_UPPER_BOUND
}

fn default_max_bracket_expansions() -> u32 {
    MAX_BRACKET_EXPANSIONS
}

impl Default for TvmConfig {
    fn default() -> Self {
        Self {
            yield_accuracy: YIELD_ACCURACY,
            max_iterations: MAX_YIELD_ITERATIONS,
            initial_upper_bound: INITIAL_YIELD_UPPER_BOUND,
            max_bracket_expansions: MAX_BRACKET_EXPANSIONS,
            require_convergence: false,
            require_conventional: false,
        }
    }
}

impl TvmConfig {
    /// Strict configuration: non-convergence and non-conventional schedules
    /// are errors.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            require_convergence: true,
            require_conventional: true,
            ..Self::default()
        }
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> AnalyticsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Sets the yield accuracy.
    #[must_use]
    pub fn with_yield_accuracy(mut self, accuracy: f64) -> Self {
        self.yield_accuracy = accuracy;
        self
    }

    /// Sets the maximum yield iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets whether non-convergence is an error.
    #[must_use]
    pub fn with_require_convergence(mut self, require: bool) -> Self {
        self.require_convergence = require;
        self
    }

    /// Sets whether non-conventional schedules are rejected.
    #[must_use]
    pub fn with_require_conventional(mut self, require: bool) -> Self {
        self.require_conventional = require;
        self
    }

    /// Solver parameters for the yield search.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.yield_accuracy, self.max_iterations)
            .with_initial_upper_bound(self.initial_upper_bound)
            .with_max_bracket_expansions(self.max_bracket_expansions)
    }
}

impl Validate for TvmConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.yield_accuracy.is_finite() && self.yield_accuracy > 0.0) {
            errors.push(ValidationError::with_rule(
                "yield_accuracy",
                format!("Yield accuracy must be positive, got {}", self.yield_accuracy),
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 || self.max_iterations > 10_000 {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                "Max iterations must be between 1 and 10000",
                "valid_iterations",
            ));
        }

        if !(self.initial_upper_bound.is_finite() && self.initial_upper_bound > 0.0) {
            errors.push(ValidationError::with_rule(
                "initial_upper_bound",
                format!(
                    "Initial upper bound must be positive, got {}",
                    self.initial_upper_bound
                ),
                "valid_bracket",
            ));
        }

        if self.max_bracket_expansions > 1_000 {
            errors.push(ValidationError::with_rule(
                "max_bracket_expansions",
                "Max bracket expansions cannot exceed 1000",
                "valid_bracket",
            ));
        }

        errors
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Returns every validation error, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error listing every problem if invalid.
    fn validate_or_error(&self) -> AnalyticsResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AnalyticsError::InvalidConfig(errors))
        }
    }
}
