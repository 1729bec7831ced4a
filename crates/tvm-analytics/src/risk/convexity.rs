//! Convexity calculations.
//!
//! Convexity measures the curvature of the price-yield relationship,
//! capturing the second-order effect that duration misses.
//!
//! ## Formula
//!
//! ```text
//! C = Σ(CF_i × t_i × (t_i + 1) / (1 + r)^t_i) / (1 + r)² / P
//! ```

use serde::{Deserialize, Serialize};

use super::ensure_priced;
use crate::cashflows::CashFlowSchedule;
use crate::error::AnalyticsResult;
use crate::pricing::validate_rate;

/// Convexity value
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Convexity(f64);

impl Convexity {
    /// Create a new Convexity value
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the convexity as f64
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Convexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl From<f64> for Convexity {
    fn from(f: f64) -> Self {
        Self(f)
    }
}

/// Convexity of `schedule` discounted at `rate`.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidRate`](crate::AnalyticsError::InvalidRate)
///   for an unusable rate
/// * [`AnalyticsError::DegenerateSchedule`](crate::AnalyticsError::DegenerateSchedule)
///   when the present value at `rate` is zero
pub fn convexity(rate: f64, schedule: &CashFlowSchedule) -> AnalyticsResult<Convexity> {
    validate_rate(rate)?;

    let base = 1.0 + rate;
    let mut weighted_sum = 0.0;
    let mut price = 0.0;
    let mut gross = 0.0;

    for (t, cf) in schedule.iter() {
        let df = base.powf(t);
        weighted_sum += cf * t * (t + 1.0) / df;
        price += cf / df;
        gross += (cf / df).abs();
    }

    ensure_priced(price, gross, "convexity")?;
    Ok(Convexity::from(weighted_sum / base.powi(2) / price))
}
