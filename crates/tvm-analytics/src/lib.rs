//! # TVM Analytics
//!
//! Discrete time-value-of-money analytics for cash-flow schedules.
//!
//! This crate provides:
//! - **Cash Flows**: Validated schedules of `(time, amount)` pairs
//! - **Pricing**: Present value at a periodic discount rate
//! - **Yields**: Yield-to-maturity by bracketed bisection
//! - **Risk**: Duration (plain, Macaulay, modified), convexity, price deltas
//! - **Config**: Solver tolerances and strictness switches
//!
//! ## Architecture
//!
//! `tvm-analytics` depends on `tvm-math` for the root finder. Every
//! computation is a pure function of its arguments; nothing is cached and
//! nothing is shared between calls.
//!
//! ## Usage
//!
//! ```rust
//! use tvm_analytics::prelude::*;
//!
//! let schedule = CashFlowSchedule::new(vec![1.0, 2.0, 3.0], vec![50.0, 50.0, 1050.0])?;
//! let config = TvmConfig::default();
//!
//! let pv = present_value(0.05, &schedule)?;
//! let ytm = yield_to_maturity_from_price(pv, &schedule, &config)?;
//! let dur = modified_duration(0.05, &schedule, &config)?;
//!
//! assert!((pv - 1000.0).abs() < 1e-9);
//! assert!((ytm.yield_value - 0.05).abs() < 1e-6);
//! assert!((dur.as_f64() - 2.72325).abs() < 1e-5);
//! # Ok::<(), tvm_analytics::AnalyticsError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;

pub use error::{AnalyticsError, AnalyticsResult};

// ============================================================================
// MODULES
// ============================================================================

pub mod cashflows;

pub mod config;

pub mod pricing;

pub mod yields;

pub mod risk;

// Flat API over raw slices
pub mod functions;

/// Prelude module for convenient imports.
///
/// ```rust
/// use tvm_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{AnalyticsError, AnalyticsResult};

    // Cash flows
    pub use crate::cashflows::CashFlowSchedule;

    // Config
    pub use crate::config::{TvmConfig, Validate, ValidationError};

    // Pricing
    pub use crate::pricing::present_value;

    // Yields
    pub use crate::yields::{yield_to_maturity, yield_to_maturity_from_price, YieldResult};

    // Risk
    pub use crate::risk::{
        convexity, convexity_adjustment, duration, macaulay_duration, modified_duration,
        modified_from_macaulay, price_delta_linear, price_delta_quadratic, Convexity, Duration,
        SensitivityCalculator, SensitivityReport,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        let err = AnalyticsError::InvalidInput("test".to_string());
        assert!(err.to_string().contains("test"));
    }
}
