//! WebAssembly bindings for the TVM engine.
//!
//! This crate exposes the cash-flow analytics to JavaScript under the
//! `loan_*` names. Times and amounts cross the boundary as `Float64Array`s.
//! The scalar exports return `NaN` on any failure; [`analyze_loan`] returns
//! an object carrying every metric and the error message, if any.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use tvm_analytics::cashflows::CashFlowSchedule;
use tvm_analytics::config::TvmConfig;
use tvm_analytics::functions;
use tvm_analytics::risk::{duration, SensitivityCalculator};
use tvm_analytics::AnalyticsResult;

// ============================================================================
// Initialization
// ============================================================================

/// Initialize the WASM module (sets up panic hook for better error messages).
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// ============================================================================
// Output Types
// ============================================================================

/// Results returned from [`analyze_loan`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LoanAnalysis {
    // Price metrics
    /// Present value at the input rate.
    pub present_value: Option<f64>,

    // Yield metrics
    /// Yield solved from the present value.
    pub ytm: Option<f64>,
    /// Whether the yield search met its accuracy.
    pub ytm_converged: Option<bool>,
    /// Bisection iterations used by the yield search.
    pub ytm_iterations: Option<u32>,

    // Risk metrics
    /// Duration at the input rate, in periods.
    pub duration: Option<f64>,
    /// Duration at the solved yield, in periods.
    pub macaulay_duration: Option<f64>,
    /// Macaulay duration divided by `1 + ytm`.
    pub modified_duration: Option<f64>,
    /// Convexity at the input rate.
    pub convexity: Option<f64>,

    // Price change for the requested rate delta
    /// Duration-only estimate of the change in present value.
    pub pv_delta: Option<f64>,
    /// Duration and convexity estimate of the change in present value.
    pub pv_delta_with_convexity: Option<f64>,

    // Error message if calculation failed
    /// First error met, if any metric could not be computed.
    pub error: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn or_nan(result: AnalyticsResult<f64>) -> f64 {
    result.unwrap_or(f64::NAN)
}

// ============================================================================
// Scalar Exports
// ============================================================================

/// Present value of the cash flows at `interest_rate`.
#[wasm_bindgen]
pub fn loan_pv(interest_rate: f64, times: &[f64], cash_flows: &[f64]) -> f64 {
    or_nan(functions::present_value(interest_rate, times, cash_flows))
}

/// Yield reproducing the present value at `interest_rate`.
#[wasm_bindgen]
pub fn loan_ytm(interest_rate: f64, times: &[f64], cash_flows: &[f64]) -> f64 {
    or_nan(functions::yield_to_maturity(interest_rate, times, cash_flows).map(|y| y.yield_value))
}

/// Yield at which the cash flows are worth `pv`.
#[wasm_bindgen]
pub fn loan_ytm_from_price(pv: f64, times: &[f64], cash_flows: &[f64]) -> f64 {
    or_nan(functions::yield_to_maturity_from_price(pv, times, cash_flows).map(|y| y.yield_value))
}

/// Duration at `interest_rate`.
#[wasm_bindgen]
pub fn loan_duration(interest_rate: f64, times: &[f64], cash_flows: &[f64]) -> f64 {
    or_nan(functions::duration(interest_rate, times, cash_flows))
}

/// Macaulay duration at the yield solved from `interest_rate`.
#[wasm_bindgen]
pub fn loan_mac_duration(interest_rate: f64, times: &[f64], cash_flows: &[f64]) -> f64 {
    or_nan(functions::macaulay_duration(interest_rate, times, cash_flows))
}

/// Modified duration at the yield solved from `interest_rate`.
#[wasm_bindgen]
pub fn loan_mod_duration(interest_rate: f64, times: &[f64], cash_flows: &[f64]) -> f64 {
    or_nan(functions::modified_duration(interest_rate, times, cash_flows))
}

/// Convexity at `interest_rate`.
#[wasm_bindgen]
pub fn loan_convexity(interest_rate: f64, times: &[f64], cash_flows: &[f64]) -> f64 {
    or_nan(functions::convexity(interest_rate, times, cash_flows))
}

/// Duration-only estimate of the change in present value.
#[wasm_bindgen]
pub fn loan_pv_delta_on_interest_rate_delta(
    interest_rate: f64,
    times: &[f64],
    cash_flows: &[f64],
    interest_rate_delta: f64,
) -> f64 {
    or_nan(functions::price_delta_linear(
        interest_rate,
        times,
        cash_flows,
        interest_rate_delta,
    ))
}

/// Duration and convexity estimate of the change in present value.
#[wasm_bindgen]
pub fn loan_pv_delta_on_interest_rate_delta_with_convex(
    interest_rate: f64,
    times: &[f64],
    cash_flows: &[f64],
    interest_rate_delta: f64,
) -> f64 {
    or_nan(functions::price_delta_quadratic(
        interest_rate,
        times,
        cash_flows,
        interest_rate_delta,
    ))
}

// ============================================================================
// Full Analysis
// ============================================================================

/// Every metric for a loan in one call.
#[wasm_bindgen]
pub fn analyze_loan(
    times: &[f64],
    cash_flows: &[f64],
    interest_rate: f64,
    interest_rate_delta: f64,
) -> JsValue {
    let result = analyze_loan_impl(times, cash_flows, interest_rate, interest_rate_delta);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn analyze_loan_impl(
    times: &[f64],
    cash_flows: &[f64],
    interest_rate: f64,
    interest_rate_delta: f64,
) -> LoanAnalysis {
    let schedule = match CashFlowSchedule::from_slices(times, cash_flows) {
        Ok(s) => s,
        Err(e) => {
            return LoanAnalysis {
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    };

    let mut analysis = LoanAnalysis::default();

    // Present value first; it is meaningful even when the risk measures fail.
    match tvm_analytics::pricing::present_value(interest_rate, &schedule) {
        Ok(pv) => analysis.present_value = Some(pv),
        Err(e) => {
            analysis.error = Some(e.to_string());
            return analysis;
        }
    }

    let report = SensitivityCalculator::new(&schedule, interest_rate, TvmConfig::default())
        .and_then(|calc| calc.report());

    match report {
        Ok(report) => {
            analysis.ytm = Some(report.ytm.yield_value);
            analysis.ytm_converged = Some(report.ytm.converged);
            analysis.ytm_iterations = Some(report.ytm.iterations);
            analysis.macaulay_duration = Some(report.macaulay_duration.as_f64());
            analysis.modified_duration = Some(report.modified_duration.as_f64());
            analysis.convexity = Some(report.convexity.as_f64());
            if interest_rate_delta.is_finite() {
                analysis.pv_delta = Some(report.estimate_price_change_linear(interest_rate_delta));
                analysis.pv_delta_with_convexity =
                    Some(report.estimate_price_change(interest_rate_delta));
            } else {
                analysis.error = Some(format!(
                    "interest rate delta must be finite, got {}",
                    interest_rate_delta
                ));
            }
        }
        Err(e) => analysis.error = Some(e.to_string()),
    }

    // Plain duration is taken at the input rate, not the solved yield.
    match duration(interest_rate, &schedule) {
        Ok(d) => analysis.duration = Some(d.as_f64()),
        Err(e) => {
            if analysis.error.is_none() {
                analysis.error = Some(e.to_string());
            }
        }
    }

    analysis
}

// ============================================================================
// Tests
// ============================================================================
