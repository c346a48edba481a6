//! Newton-Raphson IRR solver.

use serde::{Deserialize, Serialize};

use bondfolio_bonds::CashFlowSchedule;
use bondfolio_core::rates::periodic_to_effective;
use bondfolio_math::solvers::{
    newton_raphson, newton_raphson_best_effort, SolverConfig, SolverResult,
};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Starting annual rate for the iteration.
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;

/// Iterates below this annual rate are reset to it.
pub const DEFAULT_RATE_FLOOR: f64 = -0.99;

/// Which side of the bond the rate is solved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldPerspective {
    /// Pays the outlay, receives the schedule.
    Investor,
    /// Receives the proceeds, pays the schedule.
    Issuer,
}

impl YieldPerspective {
    /// Sign applied to the discounted schedule in the NPV.
    fn sign(self) -> f64 {
        match self {
            Self::Investor => 1.0,
            Self::Issuer => -1.0,
        }
    }
}

/// A solved rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldSolution {
    /// Annual rate compounded `frequency` times a year.
    pub nominal_rate: f64,
    /// Effective annual rate, `(1 + nominal_rate/f)^f - 1`.
    pub annual_rate: f64,
    /// Iterations used.
    pub iterations: u32,
    /// NPV at `nominal_rate`.
    pub residual: f64,
    /// Whether `|residual|` fell below the tolerance.
    pub converged: bool,
}

/// IRR solver for a cash flow schedule against a price.
///
/// By default it starts at 10%, stops once `|NPV| < 1e-10` or after 100
/// iterations, and clamps iterates at -99%. A non-converged result is
/// returned as a best estimate with `converged = false` unless
/// [`strict`](Self::strict) is set.
#[derive(Debug, Clone, Copy)]
pub struct IrrSolver {
    config: SolverConfig,
    initial_guess: f64,
    strict: bool,
}

impl Default for IrrSolver {
    fn default() -> Self {
        Self {
            config: SolverConfig::default().with_lower_bound(DEFAULT_RATE_FLOOR),
            initial_guess: DEFAULT_INITIAL_GUESS,
            strict: false,
        }
    }
}

impl IrrSolver {
    /// Creates a solver with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting rate.
    #[must_use]
    pub fn with_initial_guess(mut self, guess: f64) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Sets the NPV tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tolerance(tolerance);
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.config = self.config.with_max_iterations(max_iterations);
        self
    }

    /// Sets the rate floor.
    #[must_use]
    pub fn with_rate_floor(mut self, floor: f64) -> Self {
        self.config = self.config.with_lower_bound(floor);
        self
    }

    /// Fails with a solver error instead of returning a non-converged estimate.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The underlying solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves for the rate equating the schedule to `price`.
    ///
    /// `price` is the investor's outlay or the issuer's net proceeds,
    /// depending on `perspective`.
    ///
    /// # Errors
    ///
    /// - [`AnalyticsError::InvalidInput`] for a non-positive price or zero frequency
    /// - [`AnalyticsError::DegenerateCashFlow`] if every payment is zero
    /// - [`AnalyticsError::Solver`] if the iteration breaks down, or does not
    ///   converge in strict mode
    pub fn solve(
        &self,
        schedule: &CashFlowSchedule,
        price: f64,
        frequency: u32,
        perspective: YieldPerspective,
    ) -> AnalyticsResult<YieldSolution> {
        if !price.is_finite() || price <= 0.0 {
            return Err(AnalyticsError::invalid_input(format!(
                "price must be positive, got {price}"
            )));
        }
        if frequency == 0 {
            return Err(AnalyticsError::invalid_input("frequency must be at least 1"));
        }
        if schedule.iter().all(|e| e.total_payment == 0.0) {
            return Err(AnalyticsError::DegenerateCashFlow { present_value: 0.0 });
        }

        let f = f64::from(frequency);
        let sign = perspective.sign();

        // NPV and its derivative in one pass over the schedule
        let npv_parts = |rate: f64| {
            let base = 1.0 + rate / f;
            schedule
                .iter()
                .fold((0.0, 0.0), |(value, slope), entry| {
                    let p = f64::from(entry.period);
                    let pv = entry.total_payment / base.powf(p);
                    (value + pv, slope - p * pv / (f * base))
                })
        };
        let npv = |rate: f64| sign * (npv_parts(rate).0 - price);
        let d_npv = |rate: f64| sign * npv_parts(rate).1;

        let result = if self.strict {
            newton_raphson(npv, d_npv, self.initial_guess, &self.config)?
        } else {
            newton_raphson_best_effort(npv, d_npv, self.initial_guess, &self.config)?
        };

        if !result.converged {
            log::warn!(
                "{:?} IRR did not converge after {} iterations (residual {:.3e}); returning best estimate {}",
                perspective,
                result.iterations,
                result.residual,
                result.root
            );
        }

        Self::solution(&result, frequency)
    }

    fn solution(result: &SolverResult, frequency: u32) -> AnalyticsResult<YieldSolution> {
        let annual_rate = periodic_to_effective(result.root / f64::from(frequency), frequency)?;
        Ok(YieldSolution {
            nominal_rate: result.root,
            annual_rate,
            iterations: result.iterations,
            residual: result.residual,
            converged: result.converged,
        })
    }
}

/// Investor return rate (TREA) with the default solver.
pub fn return_rate(
    schedule: &CashFlowSchedule,
    outlay: f64,
    frequency: u32,
) -> AnalyticsResult<YieldSolution> {
    IrrSolver::default().solve(schedule, outlay, frequency, YieldPerspective::Investor)
}

/// Issuer cost rate (TCEA) with the default solver.
pub fn cost_rate(
    schedule: &CashFlowSchedule,
    proceeds: f64,
    frequency: u32,
) -> AnalyticsResult<YieldSolution> {
    IrrSolver::default().solve(schedule, proceeds, frequency, YieldPerspective::Issuer)
}
