//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Derivatives smaller than this are treated as zero.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Upper bound on step halvings within one iteration.
const MAX_STEP_HALVINGS: u32 = 60;

/// Newton-Raphson root-finding algorithm.
///
/// Uses the iteration `x_{n+1} = x_n - f(x_n) / f'(x_n)`, clamped from below
/// by `config.lower_bound` when set and damped as described on
/// [`newton_raphson_best_effort`]. The only stopping test is
/// `|f(x)| < tolerance`.
///
/// # Errors
///
/// - [`MathError::ConvergenceFailed`] if the tolerance is not reached within
///   `config.max_iterations`
/// - [`MathError::DivisionByZero`] if the derivative vanishes
/// - [`MathError::NonFinite`] if `f` or `f'` is NaN or infinite at the
///   initial guess, or at every damped step
///
/// # Example
///
/// ```rust
/// use bondfolio_math::solvers::{newton_raphson, SolverConfig};
///
/// // Find root of x^2 - 2 (i.e., sqrt(2))
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson(f, df, 1.5, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let result = newton_raphson_best_effort(f, df, initial_guess, config)?;
    if result.converged {
        Ok(result)
    } else {
        Err(MathError::convergence_failed(
            result.iterations,
            result.residual.abs(),
        ))
    }
}

/// Newton-Raphson that returns its last iterate when the iteration cap is hit.
///
/// The caller inspects [`SolverResult::converged`] to tell a root from a
/// best-effort estimate.
///
/// Each step is damped: while the new iterate gives a non-finite value or a
/// larger `|f|` than the current one, the step is halved back toward the
/// current iterate, at most 60 times.
///
/// # Errors
///
/// - [`MathError::DivisionByZero`] if the derivative vanishes
/// - [`MathError::NonFinite`] if `f` or `f'` is NaN or infinite at the
///   initial guess, or at every damped step
pub fn newton_raphson_best_effort<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if !initial_guess.is_finite() {
        return Err(MathError::invalid_input("initial guess must be finite"));
    }

    let mut x = config.clamp(initial_guess);
    let mut fx = checked(f(x), "objective", x)?;

    for iteration in 0..config.max_iterations {
        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
                converged: true,
            });
        }

        let dfx = checked(df(x), "derivative", x)?;
        if dfx.abs() < MIN_DERIVATIVE {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let (next, f_next) = damped_step(&f, &df, x, fx, config.clamp(x - fx / dfx))?;
        x = next;
        fx = f_next;
    }

    let converged = fx.abs() < config.tolerance;
    if !converged {
        log::debug!(
            "newton-raphson stopped after {} iterations at x = {} (residual {:.2e})",
            config.max_iterations,
            x,
            fx
        );
    }

    Ok(SolverResult {
        root: x,
        iterations: config.max_iterations,
        residual: fx,
        converged,
    })
}

/// Moves from `x` toward `target`, halving the step until the objective and
/// derivative are finite and `|f|` does not grow.
///
/// Both ends are already clamped, so every midpoint respects the lower bound.
fn damped_step<F, DF>(
    f: &F,
    df: &DF,
    x: f64,
    fx: f64,
    target: f64,
) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    let mut candidate = target;
    let mut last_finite = None;

    for _ in 0..=MAX_STEP_HALVINGS {
        let value = f(candidate);
        if value.is_finite() && df(candidate).is_finite() {
            if value.abs() <= fx.abs() || candidate == x {
                return Ok((candidate, value));
            }
            last_finite = Some((candidate, value));
        }
        candidate = x + 0.5 * (candidate - x);
    }

    match last_finite {
        Some(step) => Ok(step),
        None => Err(MathError::NonFinite {
            operation: "objective",
            x: target,
        }),
    }
}

fn checked(value: f64, operation: &'static str, x: f64) -> MathResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::NonFinite { operation, x })
    }
}
