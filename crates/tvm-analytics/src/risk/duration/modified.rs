//! Modified duration calculation.
//!
//! Modified duration measures the percentage price change per unit change in
//! yield. It's derived from Macaulay duration:
//!
//! ## Formula
//!
//! ```text
//! D_mod = D_mac / (1 + y)
//! ```
//!
//! where y is the yield to maturity per period.

use super::{macaulay_duration_with_yield, Duration};
use crate::cashflows::CashFlowSchedule;
use crate::config::TvmConfig;
use crate::error::AnalyticsResult;

/// Modified duration of `schedule`, with the yield solved from the present
/// value at `reference_rate`.
///
/// The yield is solved once and shared by the Macaulay step and the
/// `1 + y` scaling.
pub fn modified_duration(
    reference_rate: f64,
    schedule: &CashFlowSchedule,
    config: &TvmConfig,
) -> AnalyticsResult<Duration> {
    let (mac, ytm) = macaulay_duration_with_yield(reference_rate, schedule, config)?;
    Ok(modified_from_macaulay(mac, ytm.yield_value))
}

/// Convert Macaulay duration to modified duration.
///
/// # Arguments
///
/// * `macaulay` - Macaulay duration
/// * `ytm` - Yield to maturity per period (as decimal)
pub fn modified_from_macaulay(macaulay: Duration, ytm: f64) -> Duration {
    Duration::from(macaulay.as_f64() / (1.0 + ytm))
}
