//! Cash-flow schedules.
//!
//! A [`CashFlowSchedule`] is a pair of equal-length sequences: the time of
//! each flow in periods and its signed amount. The pairing is validated once,
//! on construction, so every calculation downstream can rely on it.
//!
//! Times are numeric period counts, not calendar dates. Amounts are in one
//! consistent unit; the sign convention (e.g. negative = outflow) belongs to
//! the caller.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Validated cash-flow schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct CashFlowSchedule {
    times: Vec<f64>,
    amounts: Vec<f64>,
}

/// Unvalidated wire shape of a schedule.
#[derive(Deserialize)]
struct RawSchedule {
    times: Vec<f64>,
    amounts: Vec<f64>,
}

impl TryFrom<RawSchedule> for CashFlowSchedule {
    type Error = AnalyticsError;

    fn try_from(raw: RawSchedule) -> AnalyticsResult<Self> {
        Self::new(raw.times, raw.amounts)
    }
}

impl CashFlowSchedule {
    /// Creates a schedule from owned times and amounts.
    ///
    /// # Errors
    ///
    /// * [`AnalyticsError::LengthMismatch`] if the lengths differ
    /// * [`AnalyticsError::InvalidInput`] for a negative or non-finite time,
    ///   or a non-finite amount
    pub fn new(times: Vec<f64>, amounts: Vec<f64>) -> AnalyticsResult<Self> {
        if times.len() != amounts.len() {
            return Err(AnalyticsError::LengthMismatch {
                times: times.len(),
                amounts: amounts.len(),
            });
        }

        if let Some((i, t)) = times
            .iter()
            .enumerate()
            .find(|(_, t)| !(t.is_finite() && **t >= 0.0))
        {
            return Err(AnalyticsError::InvalidInput(format!(
                "cash flow time at index {} must be finite and non-negative, got {}",
                i, t
            )));
        }

        if let Some((i, a)) = amounts.iter().enumerate().find(|(_, a)| !a.is_finite()) {
            return Err(AnalyticsError::InvalidInput(format!(
                "cash flow amount at index {} must be finite, got {}",
                i, a
            )));
        }

        Ok(Self { times, amounts })
    }

    /// Creates a schedule by copying borrowed times and amounts.
    pub fn from_slices(times: &[f64], amounts: &[f64]) -> AnalyticsResult<Self> {
        if times.len() != amounts.len() {
            return Err(AnalyticsError::LengthMismatch {
                times: times.len(),
                amounts: amounts.len(),
            });
        }
        Self::new(times.to_vec(), amounts.to_vec())
    }

    /// Creates a schedule from amounts held as decimal money values.
    pub fn from_decimal_amounts(times: Vec<f64>, amounts: &[Decimal]) -> AnalyticsResult<Self> {
        if times.len() != amounts.len() {
            return Err(AnalyticsError::LengthMismatch {
                times: times.len(),
                amounts: amounts.len(),
            });
        }

        let amounts = amounts
            .iter()
            .map(|a| {
                a.to_f64().ok_or_else(|| {
                    AnalyticsError::InvalidInput(format!("amount {} is not representable", a))
                })
            })
            .collect::<AnalyticsResult<Vec<_>>>()?;

        Self::new(times, amounts)
    }

    /// Times of the cash flows, in periods.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Signed amounts of the cash flows.
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Number of cash flows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the schedule has no cash flows.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Iterates over `(time, amount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.amounts.iter().copied())
    }

    /// Earliest cash-flow time, if any.
    pub fn min_time(&self) -> Option<f64> {
        self.times.iter().copied().reduce(f64::min)
    }

    /// Latest cash-flow time, if any.
    pub fn max_time(&self) -> Option<f64> {
        self.times.iter().copied().reduce(f64::max)
    }

    /// Undiscounted sum of the amounts.
    pub fn total_amount(&self) -> f64 {
        self.amounts.iter().sum()
    }

    /// Number of sign changes between consecutive non-zero amounts.
    pub fn sign_changes(&self) -> usize {
        let mut changes = 0;
        let mut previous: Option<bool> = None;
        for &amount in &self.amounts {
            if amount == 0.0 {
                continue;
            }
            let positive = amount > 0.0;
            if previous.is_some_and(|p| p != positive) {
                changes += 1;
            }
            previous = Some(positive);
        }
        changes
    }

    /// At most one sign change, so present value is monotone in the rate
    /// over the solver's domain.
    pub fn is_conventional(&self) -> bool {
        self.sign_changes() <= 1
    }

    /// Returns true if no amount is negative.
    pub fn all_non_negative(&self) -> bool {
        self.amounts.iter().all(|a| *a >= 0.0)
    }
}
