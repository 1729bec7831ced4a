//! Duration measures.
//!
//! - **Duration**: Present-value-weighted average time of the cash flows at a
//!   caller-supplied rate
//! - **Macaulay Duration**: Duration evaluated at the schedule's own yield
//! - **Modified Duration**: Macaulay duration divided by `1 + yield`
//!
//! ## Formula
//!
//! ```text
//! D(r) = Σ(t_i × CF_i / (1 + r)^t_i) / PV(r)
//! ```

mod macaulay;
mod modified;

pub use macaulay::{macaulay_duration, macaulay_duration_with_yield};
pub use modified::{modified_duration, modified_from_macaulay};

use serde::{Deserialize, Serialize};

use super::ensure_priced;
use crate::cashflows::CashFlowSchedule;
use crate::error::AnalyticsResult;
use crate::pricing::validate_rate;

/// Duration value, in the same period unit as the cash-flow times.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Duration(f64);

impl Duration {
    /// Create a new Duration value
    pub fn new(periods: f64) -> Self {
        Self(periods)
    }

    /// Get the duration as f64
    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4} periods", self.0)
    }
}

impl From<f64> for Duration {
    fn from(f: f64) -> Self {
        Self(f)
    }
}

/// Duration of `schedule` discounted at `rate`.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidRate`](crate::AnalyticsError::InvalidRate)
///   for an unusable rate
/// * [`AnalyticsError::DegenerateSchedule`](crate::AnalyticsError::DegenerateSchedule)
///   when the present value at `rate` is zero
pub fn duration(rate: f64, schedule: &CashFlowSchedule) -> AnalyticsResult<Duration> {
    validate_rate(rate)?;

    let base = 1.0 + rate;
    let mut weighted_sum = 0.0;
    let mut price = 0.0;
    let mut gross = 0.0;

    for (t, cf) in schedule.iter() {
        let pv = cf / base.powf(t);
        weighted_sum += t * pv;
        price += pv;
        gross += pv.abs();
    }

    ensure_priced(price, gross, "duration")?;
    Ok(Duration::from(weighted_sum / price))
}
