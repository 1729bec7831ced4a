//! Macaulay duration calculation.
//!
//! Macaulay duration is the weighted average time to receive the cash flows,
//! discounted at the schedule's own yield to maturity.
//!
//! ## Formula
//!
//! ```text
//! D_mac = Σ(t_i × PV(CF_i)) / P     at r = YTM
//! ```

use super::{duration, Duration};
use crate::cashflows::CashFlowSchedule;
use crate::config::TvmConfig;
use crate::error::AnalyticsResult;
use crate::yields::{yield_to_maturity, YieldResult};

/// Macaulay duration of `schedule`, with the yield solved from the present
/// value at `reference_rate`.
///
/// Solver failures propagate; a failed yield never reaches the duration sum.
pub fn macaulay_duration(
    reference_rate: f64,
    schedule: &CashFlowSchedule,
    config: &TvmConfig,
) -> AnalyticsResult<Duration> {
    macaulay_duration_with_yield(reference_rate, schedule, config).map(|(mac, _)| mac)
}

/// Macaulay duration together with the yield it was evaluated at.
///
/// The returned [`YieldResult`] carries the solver's convergence flag.
pub fn macaulay_duration_with_yield(
    reference_rate: f64,
    schedule: &CashFlowSchedule,
    config: &TvmConfig,
) -> AnalyticsResult<(Duration, YieldResult)> {
    let ytm = yield_to_maturity(reference_rate, schedule, config)?;
    let mac = duration(ytm.yield_value, schedule)?;
    Ok((mac, ytm))
}
