//! Interest-rate risk for cash-flow schedules.
//!
//! This module provides:
//!
//! - **Duration**: Plain (at a given rate), Macaulay and Modified
//! - **Convexity**: Analytical second-order sensitivity
//! - **Price deltas**: Linear and quadratic Taylor estimates of the change in
//!   present value for a rate shock
//! - **Calculator**: Every measure for one schedule with a single yield solve
//!
//! Duration and convexity divide by present value. A schedule whose present
//! value is zero at the evaluated rate has neither; it is reported as
//! [`AnalyticsError::DegenerateSchedule`] rather than as an infinity or NaN.
//!
//! # Example
//!
//! ```rust
//! use tvm_analytics::cashflows::CashFlowSchedule;
//! use tvm_analytics::config::TvmConfig;
//! use tvm_analytics::risk::SensitivityCalculator;
//!
//! let schedule = CashFlowSchedule::new(vec![1.0, 2.0, 3.0], vec![50.0, 50.0, 1050.0]).unwrap();
//! let report = SensitivityCalculator::new(&schedule, 0.05, TvmConfig::default())
//!     .unwrap()
//!     .report()
//!     .unwrap();
//!
//! assert!(report.modified_duration.as_f64() < report.macaulay_duration.as_f64());
//! assert!(report.estimate_price_change(0.01) < 0.0);
//! ```

pub mod calculator;
pub mod convexity;
pub mod duration;
pub mod price_delta;

pub use calculator::{SensitivityCalculator, SensitivityReport};
pub use convexity::{convexity, Convexity};
pub use duration::{
    duration, macaulay_duration, macaulay_duration_with_yield, modified_duration,
    modified_from_macaulay, Duration,
};
pub use price_delta::{convexity_adjustment, price_delta_linear, price_delta_quadratic};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Relative tolerance for treating a present value as zero.
///
/// A present value is degenerate when its magnitude is within this fraction
/// of the gross discounted flows `Σ|CF_i / (1 + r)^t_i|`, i.e. when it is
/// cancellation noise rather than value.
pub const DEGENERATE_PV_TOLERANCE: f64 = 4.0 * f64::EPSILON;

/// Fails with [`AnalyticsError::DegenerateSchedule`] if `pv` cannot be used
/// as a denominator.
///
/// `gross` is the sum of the absolute discounted flows that make up `pv`.
pub(crate) fn ensure_priced(pv: f64, gross: f64, context: &str) -> AnalyticsResult<()> {
    if pv.is_finite() && pv != 0.0 && pv.abs() > DEGENERATE_PV_TOLERANCE * gross {
        Ok(())
    } else {
        Err(AnalyticsError::DegenerateSchedule {
            context: context.to_string(),
        })
    }
}
