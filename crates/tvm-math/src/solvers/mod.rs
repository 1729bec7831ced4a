//! Root-finding algorithms.
//!
//! This module provides the numerical solver behind implied-rate searches:
//!
//! - [`bisection_decreasing`]: Expanding-bracket bisection for a function that
//!   is non-increasing on `[0, ∞)`, such as present value against discount rate
//!
//! # Termination
//!
//! The solver runs in two bounded phases. Bracket expansion doubles the upper
//! bound at most [`SolverConfig::max_bracket_expansions`] times, and the
//! bisection loop runs at most [`SolverConfig::max_iterations`] times. The
//! worst-case cost is therefore fixed by the configuration alone.
//!
//! # Example: Implied Rate
//!
//! ```rust
//! use tvm_math::solvers::{bisection_decreasing, SolverConfig};
//!
//! // 3-period loan, 5% coupon, priced at par
//! let pv = |r: f64| {
//!     50.0 / (1.0 + r) + 50.0 / (1.0 + r).powi(2) + 1050.0 / (1.0 + r).powi(3)
//! };
//!
//! let config = SolverConfig::default().with_tolerance(5e-5).with_max_iterations(200);
//! let result = bisection_decreasing(pv, 1000.0, &config).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.root - 0.05).abs() < 1e-6);
//! ```

mod bisection;

pub use bisection::bisection_decreasing;

use crate::error::{MathError, MathResult};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default upper bound the bracket search starts from.
pub const DEFAULT_INITIAL_UPPER_BOUND: f64 = 1.0;

/// Default cap on the number of times the upper bound may be doubled.
pub const DEFAULT_MAX_BRACKET_EXPANSIONS: u32 = 64;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the residual `|f(x) - target|`.
    pub tolerance: f64,
    /// Maximum number of bisection iterations.
    pub max_iterations: u32,
    /// Upper bound of the initial bracket `[0, upper]`.
    pub initial_upper_bound: f64,
    /// Maximum number of upper-bound doublings during bracket expansion.
    pub max_bracket_expansions: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            initial_upper_bound: DEFAULT_INITIAL_UPPER_BOUND,
            max_bracket_expansions: DEFAULT_MAX_BRACKET_EXPANSIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration with the default bracket settings.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the initial upper bound of the bracket.
    #[must_use]
    pub fn with_initial_upper_bound(mut self, upper: f64) -> Self {
        self.initial_upper_bound = upper;
        self
    }

    /// Sets the maximum number of bracket doublings.
    #[must_use]
    pub fn with_max_bracket_expansions(mut self, expansions: u32) -> Self {
        self.max_bracket_expansions = expansions;
        self
    }

    /// Checks that the configuration can drive a solver.
    pub fn validate(&self) -> MathResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(MathError::invalid_input(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if !(self.initial_upper_bound.is_finite() && self.initial_upper_bound > 0.0) {
            return Err(MathError::invalid_input(format!(
                "initial upper bound must be positive and finite, got {}",
                self.initial_upper_bound
            )));
        }
        Ok(())
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found, or the best estimate when `converged` is false.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (`f(root) - target`).
    pub residual: f64,
    /// Whether the residual met the tolerance within the iteration budget.
    pub converged: bool,
}

impl SolverResult {
    /// Returns the result if it converged, otherwise a convergence error.
    pub fn require_converged(self) -> MathResult<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(MathError::convergence_failed(
                self.iterations,
                self.residual.abs(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(5e-5)
            .with_max_iterations(200)
            .with_initial_upper_bound(0.5)
            .with_max_bracket_expansions(10);

        assert!((config.tolerance - 5e-5).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 200);
        assert!((config.initial_upper_bound - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.max_bracket_expansions, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_solver_config_new_keeps_bracket_defaults() {
        let config = SolverConfig::new(1e-6, 50);
        assert_eq!(config.max_iterations, 50);
        assert_eq!(config.max_bracket_expansions, DEFAULT_MAX_BRACKET_EXPANSIONS);
        assert!((config.initial_upper_bound - DEFAULT_INITIAL_UPPER_BOUND).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_bad_tolerance() {
        assert!(SolverConfig::default().with_tolerance(0.0).validate().is_err());
        assert!(SolverConfig::default().with_tolerance(-1.0).validate().is_err());
        assert!(SolverConfig::default()
            .with_tolerance(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_bad_upper_bound() {
        assert!(SolverConfig::default()
            .with_initial_upper_bound(0.0)
            .validate()
            .is_err());
        assert!(SolverConfig::default()
            .with_initial_upper_bound(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_require_converged() {
        let ok = SolverResult {
            root: 0.05,
            iterations: 12,
            residual: 1e-6,
            converged: true,
        };
        assert_eq!(ok.require_converged().unwrap(), ok);

        let stalled = SolverResult {
            converged: false,
            iterations: 200,
            residual: -0.25,
            ..ok
        };
        match stalled.require_converged() {
            Err(MathError::ConvergenceFailed {
                iterations,
                residual,
            }) => {
                assert_eq!(iterations, 200);
                assert!((residual - 0.25).abs() < f64::EPSILON);
            }
            other => panic!("Expected ConvergenceFailed, got {:?}", other),
        }
    }
}
