//! Yield-to-maturity calculations.
//!
//! The yield to maturity is the discount rate at which a schedule's present
//! value equals a target price, i.e. its internal rate of return. Two entry
//! points share one solver:
//!
//! - [`yield_to_maturity`]: the target is the present value at a reference
//!   rate
//! - [`yield_to_maturity_from_price`]: the target is a caller-supplied price
//!
//! # Search
//!
//! Present value is non-increasing in the rate for conventional schedules
//! (at most one sign change). The solver brackets the yield in `[0, 1]`,
//! doubles the upper bound until present value falls to the target, then
//! bisects until present value is within [`TvmConfig::yield_accuracy`] of the
//! target or [`TvmConfig::max_iterations`] is reached.
//!
//! Yields are searched on `[0, ∞)`. A price above the undiscounted sum of the
//! flows has no non-negative yield; the search then collapses towards zero
//! and reports `converged == false`.
//!
//! # Usage
//!
//! ```rust
//! use tvm_analytics::cashflows::CashFlowSchedule;
//! use tvm_analytics::config::TvmConfig;
//! use tvm_analytics::yields::yield_to_maturity_from_price;
//!
//! let schedule = CashFlowSchedule::new(vec![1.0, 2.0, 3.0], vec![50.0, 50.0, 1050.0]).unwrap();
//! let result = yield_to_maturity_from_price(999.999, &schedule, &TvmConfig::default()).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.yield_value - 0.05).abs() < 1e-5);
//! ```

mod solver;

pub use solver::{yield_to_maturity, yield_to_maturity_from_price};

use serde::{Deserialize, Serialize};

/// Outcome of a yield search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldResult {
    /// The yield found, or the best estimate when `converged` is false.
    pub yield_value: f64,
    /// Present value the search aimed for.
    pub target_price: f64,
    /// Bisection iterations used.
    pub iterations: u32,
    /// `PV(yield_value) - target_price`.
    pub residual: f64,
    /// Whether the residual met the configured accuracy.
    pub converged: bool,
}

impl std::fmt::Display for YieldResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}%", self.yield_value * 100.0)?;
        if !self.converged {
            write!(f, " (not converged after {} iterations)", self.iterations)?;
        }
        Ok(())
    }
}
