//! End-to-end scenarios.
//!
//! Each test prices a concrete schedule through the public API and checks
//! the numbers against hand-computed values.

use approx::assert_relative_eq;
use rust_decimal_macros::dec;
use tvm_analytics::functions;
use tvm_analytics::prelude::*;

// =============================================================================
// TEST DATA
// =============================================================================

const TIMES: [f64; 3] = [1.0, 2.0, 3.0];
const AMOUNTS: [f64; 3] = [50.0, 50.0, 1050.0];

/// 5% annual coupon on 1000 face, three years.
fn three_year_loan() -> CashFlowSchedule {
    CashFlowSchedule::from_slices(&TIMES, &AMOUNTS).unwrap()
}

/// 1000 lent at 1% per period, repaid in 12 level instalments.
fn amortizing_loan() -> (CashFlowSchedule, f64) {
    let rate: f64 = 0.01;
    let payment = 1000.0 * rate / (1.0 - (1.0 + rate).powi(-12));
    let times: Vec<f64> = (1..=12).map(f64::from).collect();
    let schedule = CashFlowSchedule::new(times, vec![payment; 12]).unwrap();
    (schedule, payment)
}

// =============================================================================
// THREE-YEAR COUPON LOAN
// =============================================================================

#[test]
fn scenario_three_year_loan_present_value() {
    let pv = present_value(0.05, &three_year_loan()).unwrap();

    // 47.619 + 45.351 + 907.029
    assert_relative_eq!(pv, 1000.0, epsilon = 1e-9);
}

#[test]
fn scenario_three_year_loan_yield_from_price() {
    let ytm =
        yield_to_maturity_from_price(999.999, &three_year_loan(), &TvmConfig::default()).unwrap();

    assert!(ytm.converged);
    assert!(ytm.iterations <= 200);
    assert_relative_eq!(ytm.yield_value, 0.05, epsilon = 1e-5);
}

#[test]
fn scenario_three_year_loan_risk() {
    let schedule = three_year_loan();
    let config = TvmConfig::default();

    assert_relative_eq!(duration(0.05, &schedule).unwrap().as_f64(), 2.85941, epsilon = 1e-5);
    assert_relative_eq!(
        macaulay_duration(0.05, &schedule, &config).unwrap().as_f64(),
        2.85941,
        epsilon = 1e-5
    );
    assert_relative_eq!(
        modified_duration(0.05, &schedule, &config).unwrap().as_f64(),
        2.72325,
        epsilon = 1e-5
    );
    assert_relative_eq!(convexity(0.05, &schedule).unwrap().as_f64(), 10.20562, epsilon = 1e-5);
}

#[test]
fn scenario_three_year_loan_price_deltas() {
    let schedule = three_year_loan();
    let config = TvmConfig::default();

    let linear = price_delta_linear(0.05, &schedule, 0.01, &config).unwrap();
    let quadratic = price_delta_quadratic(0.05, &schedule, 0.01, &config).unwrap();
    let exact = present_value(0.06, &schedule).unwrap() - present_value(0.05, &schedule).unwrap();

    assert_relative_eq!(linear, -27.23248, epsilon = 1e-4);
    assert_relative_eq!(quadratic, -26.72220, epsilon = 1e-4);
    assert!((quadratic - exact).abs() < (linear - exact).abs());
}

#[test]
fn scenario_flat_and_typed_api_agree() {
    let schedule = three_year_loan();
    let config = TvmConfig::default();

    assert_eq!(
        functions::present_value(0.05, &TIMES, &AMOUNTS).unwrap(),
        present_value(0.05, &schedule).unwrap()
    );
    assert_eq!(
        functions::modified_duration(0.05, &TIMES, &AMOUNTS).unwrap(),
        modified_duration(0.05, &schedule, &config).unwrap().as_f64()
    );
    assert_eq!(
        functions::price_delta_quadratic(0.05, &TIMES, &AMOUNTS, 0.01).unwrap(),
        price_delta_quadratic(0.05, &schedule, 0.01, &config).unwrap()
    );
}

#[test]
fn scenario_decimal_amounts() {
    let schedule = CashFlowSchedule::from_decimal_amounts(
        TIMES.to_vec(),
        &[dec!(50.00), dec!(50.00), dec!(1050.00)],
    )
    .unwrap();

    assert_eq!(schedule, three_year_loan());
}

// =============================================================================
// AMORTIZING LOAN
// =============================================================================

#[test]
fn scenario_amortizing_loan() {
    let (schedule, payment) = amortizing_loan();
    let config = TvmConfig::default();

    assert_relative_eq!(payment, 88.84879, epsilon = 1e-5);
    assert_relative_eq!(present_value(0.01, &schedule).unwrap(), 1000.0, epsilon = 1e-9);

    let ytm = yield_to_maturity_from_price(1000.0, &schedule, &config).unwrap();
    assert!(ytm.converged);
    assert_relative_eq!(ytm.yield_value, 0.01, epsilon = 1e-6);

    assert_relative_eq!(duration(0.01, &schedule).unwrap().as_f64(), 6.38145, epsilon = 1e-5);
    assert_relative_eq!(
        modified_duration(0.01, &schedule, &config).unwrap().as_f64(),
        6.31827,
        epsilon = 1e-4
    );
    assert_relative_eq!(convexity(0.01, &schedule).unwrap().as_f64(), 57.84974, epsilon = 1e-4);
}

#[test]
fn scenario_lender_view_yield_is_internal_rate() {
    // Outflow of the principal at time zero, then the instalments.
    let (instalments, payment) = amortizing_loan();
    let mut times = vec![0.0];
    let mut amounts = vec![-1000.0];
    times.extend_from_slice(instalments.times());
    amounts.extend(std::iter::repeat(payment).take(12));
    let schedule = CashFlowSchedule::new(times, amounts).unwrap();

    assert!(schedule.is_conventional());
    assert_relative_eq!(present_value(0.01, &schedule).unwrap(), 0.0, epsilon = 1e-9);

    let ytm = yield_to_maturity_from_price(0.0, &schedule, &TvmConfig::strict()).unwrap();
    assert_relative_eq!(ytm.yield_value, 0.01, epsilon = 1e-6);
}

// =============================================================================
// CONFIGURATION AND FAILURE MODES
// =============================================================================

#[test]
fn scenario_json_config() {
    let config = TvmConfig::from_json(r#"{"yield_accuracy": 1e-8, "require_convergence": true}"#)
        .unwrap();

    assert_eq!(config.max_iterations, 200);
    assert!(config.require_convergence);

    let ytm = yield_to_maturity(0.05, &three_year_loan(), &config).unwrap();
    assert!(ytm.residual.abs() < 1e-8);
    assert_relative_eq!(ytm.yield_value, 0.05, epsilon = 1e-10);

    assert!(matches!(
        TvmConfig::from_json(r#"{"yield_accuracy": -1.0}"#),
        Err(AnalyticsError::InvalidConfig(_))
    ));
    assert!(matches!(
        TvmConfig::from_json("not json"),
        Err(AnalyticsError::ConfigParse(_))
    ));
}

#[test]
fn scenario_iteration_budget_exhausted() {
    let schedule = three_year_loan();
    let lenient = TvmConfig::default().with_max_iterations(1);

    // One evaluation at 0.5, then the bracket halves to [0, 0.5].
    let ytm = yield_to_maturity_from_price(999.999, &schedule, &lenient).unwrap();
    assert!(!ytm.converged);
    assert_eq!(ytm.iterations, 1);
    assert_relative_eq!(ytm.yield_value, 0.25);

    let strict = lenient.with_require_convergence(true);
    assert!(matches!(
        yield_to_maturity_from_price(999.999, &schedule, &strict),
        Err(AnalyticsError::YieldSolverFailed { iterations: 1, .. })
    ));
}

#[test]
fn scenario_non_conventional_schedule() {
    let schedule = CashFlowSchedule::new(vec![0.0, 1.0, 2.0], vec![-100.0, 230.0, -132.0]).unwrap();
    assert_eq!(schedule.sign_changes(), 2);

    assert!(yield_to_maturity(0.05, &schedule, &TvmConfig::default()).is_ok());
    assert_eq!(
        yield_to_maturity(0.05, &schedule, &TvmConfig::strict()),
        Err(AnalyticsError::NonConventionalSchedule { sign_changes: 2 })
    );
}

#[test]
fn scenario_degenerate_and_invalid_inputs() {
    let schedule = three_year_loan();
    let zeros = CashFlowSchedule::new(vec![1.0, 2.0], vec![0.0, 0.0]).unwrap();

    assert!(matches!(
        duration(0.05, &zeros),
        Err(AnalyticsError::DegenerateSchedule { .. })
    ));
    assert!(matches!(
        present_value(-1.0, &schedule),
        Err(AnalyticsError::InvalidRate { .. })
    ));
    assert!(matches!(
        functions::present_value(0.05, &[1.0, 2.0], &[100.0]),
        Err(AnalyticsError::LengthMismatch { times: 2, amounts: 1 })
    ));
    assert!(serde_json::from_str::<CashFlowSchedule>(r#"{"times": [1.0], "amounts": []}"#).is_err());
}

#[test]
fn scenario_small_present_values_are_priced() {
    // Worth ≈ 4.5e-22 at 500% per period, but not zero.
    assert_relative_eq!(functions::duration(5.0, &[30.0], &[100.0]).unwrap(), 30.0, epsilon = 1e-12);
    assert_relative_eq!(
        functions::convexity(5.0, &[30.0], &[100.0]).unwrap(),
        930.0 / 36.0,
        epsilon = 1e-10
    );

    // Amounts in a unit where the whole schedule is 2e-11.
    let dur = functions::duration(0.05, &[1.0, 2.0], &[1e-11, 1e-11]).unwrap();
    assert!(dur > 1.0 && dur < 2.0);
}

#[test]
fn scenario_sensitivity_report() {
    let schedule = three_year_loan();

    let report = SensitivityCalculator::new(&schedule, 0.05, TvmConfig::default())
        .unwrap()
        .report()
        .unwrap();

    assert_relative_eq!(report.estimate_price_change_linear(0.01), -27.23248, epsilon = 1e-4);
    assert_relative_eq!(report.estimate_price_change(0.01), -26.72220, epsilon = 1e-4);

    let json = serde_json::to_string(&report).unwrap();
    let restored: SensitivityReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.ytm.converged, report.ytm.converged);
    assert_relative_eq!(
        restored.modified_duration.as_f64(),
        report.modified_duration.as_f64(),
        epsilon = 1e-12
    );
}
