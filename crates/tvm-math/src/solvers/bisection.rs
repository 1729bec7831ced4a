//! Expanding-bracket bisection.

use log::{debug, trace, warn};

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Finds `x >= 0` with `f(x) ≈ target` for a non-increasing function `f`.
///
/// The search starts from the bracket `[0, initial_upper_bound]` and doubles
/// the upper bound while `f(upper) > target`. It then bisects: when the
/// midpoint overshoots the target (`f(mid) > target`) the root lies above it,
/// otherwise below.
///
/// Convergence is judged on the residual `|f(mid) - target| < tolerance`,
/// not on the bracket width. When the iteration budget runs out the last
/// midpoint is returned with `converged == false`.
///
/// Monotonicity is assumed, not checked. For a function that is not
/// non-increasing the result is whatever the search lands on.
///
/// # Arguments
///
/// * `f` - The function to invert
/// * `target` - The value `f` should attain
/// * `config` - Solver configuration
///
/// # Errors
///
/// * [`MathError::InvalidInput`] for a non-finite target or invalid config
/// * [`MathError::BracketNotFound`] when `f` stays above `target` after the
///   allowed number of doublings
///
/// # Example
///
/// ```rust
/// use tvm_math::solvers::{bisection_decreasing, SolverConfig};
///
/// // Zero-coupon: 100 / (1 + r)^2 = 81  =>  r = 1/9
/// let f = |r: f64| 100.0 / (1.0 + r).powi(2);
///
/// let result = bisection_decreasing(f, 81.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - 1.0 / 9.0).abs() < 1e-9);
/// ```
pub fn bisection_decreasing<F>(f: F, target: f64, config: &SolverConfig) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;
    if !target.is_finite() {
        return Err(MathError::invalid_input(format!(
            "target must be finite, got {}",
            target
        )));
    }

    let mut low = 0.0_f64;
    let mut high = config.initial_upper_bound;

    // Grow the bracket until the upper bound undershoots the target.
    let mut expansions = 0;
    let mut f_high = f(high);
    while f_high > target {
        if expansions >= config.max_bracket_expansions || !(high * 2.0).is_finite() {
            return Err(MathError::BracketNotFound {
                upper: high,
                value: f_high,
                target,
                expansions,
            });
        }
        high *= 2.0;
        expansions += 1;
        f_high = f(high);
    }
    if expansions > 0 {
        debug!("bisection bracket expanded {} times to [0, {}]", expansions, high);
    }

    let mut mid = 0.5 * (low + high);
    for iteration in 0..config.max_iterations {
        let diff = f(mid) - target;
        trace!("bisection iteration {}: x = {}, residual = {:e}", iteration, mid, diff);

        if diff.abs() < config.tolerance {
            debug!(
                "bisection converged after {} iterations: x = {}",
                iteration + 1,
                mid
            );
            return Ok(SolverResult {
                root: mid,
                iterations: iteration + 1,
                residual: diff,
                converged: true,
            });
        }

        if diff > 0.0 {
            low = mid;
        } else {
            high = mid;
        }
        mid = 0.5 * (low + high);
    }

    let residual = f(mid) - target;
    warn!(
        "bisection did not converge in {} iterations: x = {}, residual = {:e}",
        config.max_iterations, mid, residual
    );
    Ok(SolverResult {
        root: mid,
        iterations: config.max_iterations,
        residual,
        converged: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn loan_config() -> SolverConfig {
        SolverConfig::default()
            .with_tolerance(5e-5)
            .with_max_iterations(200)
    }

    #[test]
    fn test_reciprocal() {
        // 1 / (1 + x) = 0.5  =>  x = 1, the initial upper bound
        let f = |x: f64| 1.0 / (1.0 + x);

        let result = bisection_decreasing(f, 0.5, &SolverConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.root, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_bracket_expansion() {
        // 100 / (1 + x) = 10  =>  x = 9, needs the bracket grown to [0, 16]
        let f = |x: f64| 100.0 / (1.0 + x);

        let result = bisection_decreasing(f, 10.0, &SolverConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.root, 9.0, epsilon = 1e-8);
    }

    #[test]
    fn test_first_midpoint_hit() {
        // f(0.5) is exactly the target, so the first iteration succeeds
        let f = |x: f64| 10.0 - x;

        let result = bisection_decreasing(f, 9.5, &SolverConfig::default()).unwrap();

        assert!(result.converged);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.root, 0.5);
    }

    #[test]
    fn test_non_convergence_returns_last_midpoint() {
        let f = |x: f64| 1.0 / (1.0 + x);
        let config = SolverConfig::default()
            .with_tolerance(1e-300)
            .with_max_iterations(3);

        let result = bisection_decreasing(f, 0.6, &config).unwrap();

        // mid sequence: 0.5 (f > 0.6 -> low), 0.75 (f < 0.6 -> high), 0.625 (f > 0.6 -> low)
        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
        assert_eq!(result.root, 0.6875);
        assert_relative_eq!(result.residual, 1.0 / 1.6875 - 0.6, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_iterations_returns_initial_midpoint() {
        let f = |x: f64| 1.0 / (1.0 + x);
        let config = SolverConfig::default().with_max_iterations(0);

        let result = bisection_decreasing(f, 0.9, &config).unwrap();

        assert!(!result.converged);
        assert_eq!(result.root, 0.5);
    }

    #[test]
    fn test_target_above_value_at_zero() {
        // No non-negative root exists; the search collapses towards zero
        let f = |x: f64| 1.0 / (1.0 + x);

        let result = bisection_decreasing(f, 2.0, &loan_config()).unwrap();

        assert!(!result.converged);
        assert!(result.root < 1e-50);
    }

    #[test]
    fn test_bracket_not_found() {
        let f = |_x: f64| 100.0;

        let result = bisection_decreasing(f, 50.0, &SolverConfig::default());

        match result {
            Err(MathError::BracketNotFound { expansions, .. }) => {
                assert_eq!(expansions, 64);
            }
            other => panic!("Expected BracketNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_target() {
        let f = |x: f64| 1.0 / (1.0 + x);

        assert!(matches!(
            bisection_decreasing(f, f64::NAN, &SolverConfig::default()),
            Err(MathError::InvalidInput { .. })
        ));
        assert!(matches!(
            bisection_decreasing(f, f64::INFINITY, &SolverConfig::default()),
            Err(MathError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let f = |x: f64| 1.0 / (1.0 + x);
        let config = SolverConfig::default().with_tolerance(0.0);

        assert!(bisection_decreasing(f, 0.5, &config).is_err());
    }

    proptest! {
        #[test]
        fn prop_zero_coupon_root_reproduces_target(
            rate in 0.001f64..4.0,
            periods in 1i32..30,
            face in 1.0f64..1_000_000.0,
        ) {
            let f = |x: f64| face / (1.0 + x).powi(periods);
            let target = f(rate);

            let result = bisection_decreasing(f, target, &loan_config()).unwrap();

            prop_assert!(result.converged);
            prop_assert!((f(result.root) - target).abs() < 5e-5);
        }
    }
}
