//! Standalone functions over raw slices.
//!
//! This module is the plain numeric API: parallel `times` and `amounts`
//! slices in, a number (or [`YieldResult`]) out. Each call validates the
//! pairing once, before any arithmetic, and uses [`TvmConfig::default`].
//!
//! | Function | Inputs |
//! |---|---|
//! | [`present_value`] | rate, times, amounts |
//! | [`yield_to_maturity`] | reference rate, times, amounts |
//! | [`yield_to_maturity_from_price`] | target price, times, amounts |
//! | [`duration`] | rate, times, amounts |
//! | [`macaulay_duration`] | reference rate, times, amounts |
//! | [`modified_duration`] | reference rate, times, amounts |
//! | [`convexity`] | rate, times, amounts |
//! | [`price_delta_linear`] | rate, times, amounts, rate delta |
//! | [`price_delta_quadratic`] | rate, times, amounts, rate delta |
//!
//! # Example
//!
//! ```rust
//! use tvm_analytics::functions::{present_value, yield_to_maturity_from_price};
//! use tvm_analytics::AnalyticsError;
//!
//! let times = [1.0, 2.0, 3.0];
//! let amounts = [50.0, 50.0, 1050.0];
//!
//! let pv = present_value(0.05, &times, &amounts).unwrap();
//! let ytm = yield_to_maturity_from_price(pv, &times, &amounts).unwrap();
//! assert!((ytm.yield_value - 0.05).abs() < 1e-6);
//!
//! assert!(matches!(
//!     present_value(0.05, &[1.0, 2.0], &[100.0]),
//!     Err(AnalyticsError::LengthMismatch { times: 2, amounts: 1 })
//! ));
//! ```

use crate::cashflows::CashFlowSchedule;
use crate::config::TvmConfig;
use crate::error::AnalyticsResult;
use crate::yields::YieldResult;
use crate::{pricing, risk, yields};

// ============================================================================
// PRICE AND YIELD
// ============================================================================

/// Present value of the cash flows at `rate`.
pub fn present_value(rate: f64, times: &[f64], amounts: &[f64]) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::from_slices(times, amounts)?;
    pricing::present_value(rate, &schedule)
}

/// Yield at which the cash flows are worth their present value at
/// `reference_rate`.
pub fn yield_to_maturity(
    reference_rate: f64,
    times: &[f64],
    amounts: &[f64],
) -> AnalyticsResult<YieldResult> {
    let schedule = CashFlowSchedule::from_slices(times, amounts)?;
    yields::yield_to_maturity(reference_rate, &schedule, &TvmConfig::default())
}

/// Yield at which the cash flows are worth `price`.
pub fn yield_to_maturity_from_price(
    price: f64,
    times: &[f64],
    amounts: &[f64],
) -> AnalyticsResult<YieldResult> {
    let schedule = CashFlowSchedule::from_slices(times, amounts)?;
    yields::yield_to_maturity_from_price(price, &schedule, &TvmConfig::default())
}

// ============================================================================
// DURATION AND CONVEXITY
// ============================================================================

/// Duration of the cash flows at `rate`, in periods.
pub fn duration(rate: f64, times: &[f64], amounts: &[f64]) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::from_slices(times, amounts)?;
    risk::duration(rate, &schedule).map(|d| d.as_f64())
}

/// Macaulay duration, evaluated at the yield solved from `reference_rate`.
pub fn macaulay_duration(
    reference_rate: f64,
    times: &[f64],
    amounts: &[f64],
) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::from_slices(times, amounts)?;
    risk::macaulay_duration(reference_rate, &schedule, &TvmConfig::default()).map(|d| d.as_f64())
}

/// Modified duration, evaluated at the yield solved from `reference_rate`.
pub fn modified_duration(
    reference_rate: f64,
    times: &[f64],
    amounts: &[f64],
) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::from_slices(times, amounts)?;
    risk::modified_duration(reference_rate, &schedule, &TvmConfig::default()).map(|d| d.as_f64())
}

/// Convexity of the cash flows at `rate`.
pub fn convexity(rate: f64, times: &[f64], amounts: &[f64]) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::from_slices(times, amounts)?;
    risk::convexity(rate, &schedule).map(|c| c.as_f64())
}

// ============================================================================
// PRICE DELTAS
// ============================================================================

/// Linear estimate of the change in present value for `rate_delta`.
pub fn price_delta_linear(
    rate: f64,
    times: &[f64],
    amounts: &[f64],
    rate_delta: f64,
) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::from_slices(times, amounts)?;
    risk::price_delta_linear(rate, &schedule, rate_delta, &TvmConfig::default())
}

/// Quadratic estimate of the change in present value for `rate_delta`.
pub fn price_delta_quadratic(
    rate: f64,
    times: &[f64],
    amounts: &[f64],
    rate_delta: f64,
) -> AnalyticsResult<f64> {
    let schedule = CashFlowSchedule::from_slices(times, amounts)?;
    risk::price_delta_quadratic(rate, &schedule, rate_delta, &TvmConfig::default())
}
