//! Price-delta estimators.
//!
//! Taylor approximations of the change in present value for a rate shock Δr:
//!
//! ```text
//! linear:     ΔP ≈ (-D_mod × Δr) × P
//! quadratic:  ΔP ≈ (-D_mod × Δr + (C / 2) × Δr²) × P
//! ```
//!
//! These are estimates. They are not `PV(r + Δr) - PV(r)`, and drift from it
//! as the shock grows.

use super::{convexity, modified_duration};
use crate::cashflows::CashFlowSchedule;
use crate::config::TvmConfig;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::pricing::present_value;
use crate::risk::Convexity;

/// Linear (duration-only) estimate of the change in present value.
///
/// Modified duration is taken at the yield solved from `rate`.
pub fn price_delta_linear(
    rate: f64,
    schedule: &CashFlowSchedule,
    rate_delta: f64,
    config: &TvmConfig,
) -> AnalyticsResult<f64> {
    validate_rate_delta(rate_delta)?;

    let pv = present_value(rate, schedule)?;
    let mod_dur = modified_duration(rate, schedule, config)?;
    let delta_percent = -mod_dur.as_f64() * rate_delta;

    Ok(delta_percent * pv)
}

/// Quadratic (duration and convexity) estimate of the change in present value.
///
/// Modified duration is taken at the yield solved from `rate`; convexity is
/// taken at `rate` itself.
pub fn price_delta_quadratic(
    rate: f64,
    schedule: &CashFlowSchedule,
    rate_delta: f64,
    config: &TvmConfig,
) -> AnalyticsResult<f64> {
    validate_rate_delta(rate_delta)?;

    let pv = present_value(rate, schedule)?;
    let mod_dur = modified_duration(rate, schedule, config)?;
    let conv = convexity(rate, schedule)?;
    let delta_percent = -mod_dur.as_f64() * rate_delta + convexity_adjustment(conv, rate_delta);

    Ok(delta_percent * pv)
}

/// Convexity term of the quadratic estimate, `(C / 2) × Δr²`.
pub fn convexity_adjustment(convexity: Convexity, rate_delta: f64) -> f64 {
    (convexity.as_f64() / 2.0) * rate_delta.powi(2)
}

fn validate_rate_delta(rate_delta: f64) -> AnalyticsResult<()> {
    if rate_delta.is_finite() {
        Ok(())
    } else {
        Err(AnalyticsError::InvalidInput(format!(
            "rate delta must be finite, got {}",
            rate_delta
        )))
    }
}
