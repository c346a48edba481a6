//! Root-finding algorithms.
//!
//! - [`newton_raphson`]: quadratic convergence when the derivative is known;
//!   fails if the tolerance is not reached within the iteration cap
//! - [`newton_raphson_best_effort`]: same iteration, but returns the last
//!   iterate with `converged = false` instead of failing
//!
//! Both honour [`SolverConfig::lower_bound`], which clamps every iterate from
//! below. Yield calculations use it to keep `1 + r/n` positive.
//!
//! # Example: IRR of a three-period bond
//!
//! ```rust
//! use bondfolio_math::solvers::{newton_raphson, SolverConfig};
//!
//! // Pay 95, receive 5, 5, 105
//! let npv = |r: f64| -95.0 + 5.0 / (1.0 + r) + 5.0 / (1.0 + r).powi(2) + 105.0 / (1.0 + r).powi(3);
//! let d_npv = |r: f64| {
//!     -5.0 / (1.0 + r).powi(2) - 10.0 / (1.0 + r).powi(3) - 315.0 / (1.0 + r).powi(4)
//! };
//!
//! let config = SolverConfig::default().with_lower_bound(-0.99);
//! let result = newton_raphson(npv, d_npv, 0.10, &config).unwrap();
//! assert!(result.root > 0.05);
//! ```

mod newton;

pub use newton::{newton_raphson, newton_raphson_best_effort};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance on `|f(x)|` for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Iterates below this value are reset to it.
    pub lower_bound: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower_bound: None,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
            lower_bound: None,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the lower bound applied after every step.
    #[must_use]
    pub fn with_lower_bound(mut self, lower_bound: f64) -> Self {
        self.lower_bound = Some(lower_bound);
        self
    }

    pub(crate) fn clamp(&self, x: f64) -> f64 {
        match self.lower_bound {
            Some(floor) if x < floor => floor,
            _ => x,
        }
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found (or the last iterate if not converged).
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
    /// Whether `|residual|` fell below the tolerance.
    pub converged: bool,
}
