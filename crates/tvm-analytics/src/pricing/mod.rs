//! Present value of a cash-flow schedule.
//!
//! ## Formula
//!
//! ```text
//! PV(r) = Σ CF_i / (1 + r)^t_i
//! ```
//!
//! where:
//! - r = discount rate per period (decimal)
//! - t_i = time of cash flow i, in periods
//! - CF_i = amount of cash flow i
//!
//! Every other measure in this crate is built on this sum.

use crate::cashflows::CashFlowSchedule;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Checks that `rate` is a usable discount rate.
///
/// The discount base `1 + rate` must be positive: at `rate = -1` every
/// discount factor divides by zero, and below it fractional powers of a
/// negative base are undefined.
pub fn validate_rate(rate: f64) -> AnalyticsResult<()> {
    if rate.is_finite() && rate > -1.0 {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidRate { rate })
    }
}

/// Present value of `schedule` discounted at `rate`.
///
/// # Errors
///
/// [`AnalyticsError::InvalidRate`] when `rate` is not finite or `rate <= -1`.
///
/// # Example
///
/// ```rust
/// use tvm_analytics::cashflows::CashFlowSchedule;
/// use tvm_analytics::pricing::present_value;
///
/// let schedule = CashFlowSchedule::new(vec![1.0, 2.0, 3.0], vec![50.0, 50.0, 1050.0]).unwrap();
/// let pv = present_value(0.05, &schedule).unwrap();
/// assert!((pv - 1000.0).abs() < 1e-9);
/// ```
pub fn present_value(rate: f64, schedule: &CashFlowSchedule) -> AnalyticsResult<f64> {
    validate_rate(rate)?;
    Ok(present_value_unchecked(rate, schedule))
}

/// Present value without validating `rate`.
///
/// This is the kernel the yield solver evaluates on every iteration, where
/// rates are always non-negative.
#[inline]
pub fn present_value_unchecked(rate: f64, schedule: &CashFlowSchedule) -> f64 {
    let base = 1.0 + rate;
    schedule
        .iter()
        .map(|(t, cf)| cf / base.powf(t))
        .sum()
}
