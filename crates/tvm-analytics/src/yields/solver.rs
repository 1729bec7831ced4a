//! Bisection yield solver.

use log::{debug, warn};
use tvm_math::solvers::bisection_decreasing;
use tvm_math::MathError;

use super::YieldResult;
use crate::cashflows::CashFlowSchedule;
use crate::config::{TvmConfig, Validate};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::pricing::{present_value, present_value_unchecked};

/// Yield at which `schedule` is worth what it is worth at `reference_rate`.
///
/// For a conventional schedule this recovers `reference_rate` itself to
/// within the solver accuracy; its use is as the first step of the duration
/// measures, which are evaluated at the solved yield.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidRate`] for an unusable reference rate
/// * see [`yield_to_maturity_from_price`] for the solver errors
pub fn yield_to_maturity(
    reference_rate: f64,
    schedule: &CashFlowSchedule,
    config: &TvmConfig,
) -> AnalyticsResult<YieldResult> {
    let target = present_value(reference_rate, schedule)?;
    solve_yield(target, schedule, config)
}

/// Yield at which the present value of `schedule` equals `price`.
///
/// # Errors
///
/// * [`AnalyticsError::InvalidInput`] for a non-finite price or an empty
///   schedule
/// * [`AnalyticsError::InvalidConfig`] if `config` fails validation
/// * [`AnalyticsError::NonConventionalSchedule`] when
///   `config.require_conventional` is set and the amounts change sign more
///   than once
/// * [`AnalyticsError::YieldSolverFailed`] when no bracket is found, or when
///   `config.require_convergence` is set and the iteration budget runs out
pub fn yield_to_maturity_from_price(
    price: f64,
    schedule: &CashFlowSchedule,
    config: &TvmConfig,
) -> AnalyticsResult<YieldResult> {
    if !price.is_finite() {
        return Err(AnalyticsError::InvalidInput(format!(
            "price must be finite, got {}",
            price
        )));
    }
    solve_yield(price, schedule, config)
}

fn solve_yield(
    target: f64,
    schedule: &CashFlowSchedule,
    config: &TvmConfig,
) -> AnalyticsResult<YieldResult> {
    config.validate_or_error()?;

    if schedule.is_empty() {
        return Err(AnalyticsError::InvalidInput(
            "no cash flows provided".to_string(),
        ));
    }

    let sign_changes = schedule.sign_changes();
    if sign_changes > 1 {
        if config.require_conventional {
            return Err(AnalyticsError::NonConventionalSchedule { sign_changes });
        }
        // Present value need not be monotone here; the bisection result is
        // whatever the search lands on.
        warn!(
            "solving yield for a schedule with {} sign changes; result may not be unique",
            sign_changes
        );
    }

    let solution = bisection_decreasing(
        |rate| present_value_unchecked(rate, schedule),
        target,
        &config.solver_config(),
    )
    .map_err(|err| match err {
        MathError::BracketNotFound { .. } => AnalyticsError::YieldSolverFailed {
            iterations: 0,
            reason: err.to_string(),
        },
        other => other.into(),
    })?;

    if config.require_convergence {
        solution
            .require_converged()
            .map_err(|err| AnalyticsError::YieldSolverFailed {
                iterations: solution.iterations,
                reason: err.to_string(),
            })?;
    }

    debug!(
        "yield {} for target {} ({} iterations, converged: {})",
        solution.root, target, solution.iterations, solution.converged
    );

    Ok(YieldResult {
        yield_value: solution.root,
        target_price: target,
        iterations: solution.iterations,
        residual: solution.residual,
        converged: solution.converged,
    })
}
