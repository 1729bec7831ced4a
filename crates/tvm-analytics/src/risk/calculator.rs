//! Integrated sensitivity calculator.
//!
//! [`SensitivityCalculator`] computes every measure for one schedule at one
//! rate, solving the yield once. Its numbers are identical to calling the
//! standalone functions one by one.

use serde::{Deserialize, Serialize};

use super::{convexity, duration, modified_from_macaulay, Convexity, Duration};
use crate::cashflows::CashFlowSchedule;
use crate::config::{TvmConfig, Validate};
use crate::error::AnalyticsResult;
use crate::pricing::{present_value, validate_rate};
use crate::risk::convexity_adjustment;
use crate::yields::{yield_to_maturity, YieldResult};

/// Complete sensitivity metrics for a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    /// Rate the schedule was evaluated at.
    pub rate: f64,
    /// Present value at `rate`.
    pub present_value: f64,
    /// Yield solved from `present_value`, with its convergence flag.
    pub ytm: YieldResult,
    /// Duration at the solved yield.
    pub macaulay_duration: Duration,
    /// Macaulay duration scaled by `1 / (1 + ytm)`.
    pub modified_duration: Duration,
    /// Convexity at `rate`.
    pub convexity: Convexity,
}

impl SensitivityReport {
    /// Quadratic estimate of the change in present value for `rate_delta`.
    ///
    /// ΔP ≈ (-D_mod × Δr + (1/2) × C × Δr²) × P
    pub fn estimate_price_change(&self, rate_delta: f64) -> f64 {
        let delta_percent = -self.modified_duration.as_f64() * rate_delta
            + convexity_adjustment(self.convexity, rate_delta);
        delta_percent * self.present_value
    }

    /// Linear estimate of the change in present value for `rate_delta`.
    pub fn estimate_price_change_linear(&self, rate_delta: f64) -> f64 {
        -self.modified_duration.as_f64() * rate_delta * self.present_value
    }
}

/// Calculator for schedule sensitivities.
pub struct SensitivityCalculator<'a> {
    schedule: &'a CashFlowSchedule,
    rate: f64,
    config: TvmConfig,
}

impl<'a> SensitivityCalculator<'a> {
    /// Creates a calculator for `schedule` at `rate`.
    ///
    /// # Errors
    ///
    /// Returns error if the rate is unusable or the configuration invalid.
    pub fn new(schedule: &'a CashFlowSchedule, rate: f64, config: TvmConfig) -> AnalyticsResult<Self> {
        validate_rate(rate)?;
        config.validate_or_error()?;
        Ok(Self {
            schedule,
            rate,
            config,
        })
    }

    /// Present value at the calculator's rate.
    pub fn present_value(&self) -> AnalyticsResult<f64> {
        present_value(self.rate, self.schedule)
    }

    /// Yield solved from the present value at the calculator's rate.
    pub fn yield_to_maturity(&self) -> AnalyticsResult<YieldResult> {
        yield_to_maturity(self.rate, self.schedule, &self.config)
    }

    /// Convexity at the calculator's rate.
    pub fn convexity(&self) -> AnalyticsResult<Convexity> {
        convexity(self.rate, self.schedule)
    }

    /// Computes all metrics.
    pub fn report(&self) -> AnalyticsResult<SensitivityReport> {
        let present_value = self.present_value()?;
        let ytm = self.yield_to_maturity()?;
        let macaulay_duration = duration(ytm.yield_value, self.schedule)?;
        let modified_duration = modified_from_macaulay(macaulay_duration, ytm.yield_value);
        let convexity = self.convexity()?;

        Ok(SensitivityReport {
            rate: self.rate,
            present_value,
            ytm,
            macaulay_duration,
            modified_duration,
            convexity,
        })
    }
}
