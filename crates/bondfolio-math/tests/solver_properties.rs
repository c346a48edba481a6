//! Property tests for the Newton-Raphson solvers.

use bondfolio_math::prelude::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn square_roots_converge(a in 0.01f64..1.0e4) {
        let f = |x: f64| x * x - a;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson(f, df, a.max(1.0), &SolverConfig::default()).unwrap();

        prop_assert!(result.converged);
        prop_assert!(result.residual.abs() < SolverConfig::default().tolerance);
        prop_assert!((result.root - a.sqrt()).abs() <= 1e-9 * a.sqrt().max(1.0));
    }

    #[test]
    fn iterates_never_cross_the_lower_bound(target in -5.0f64..5.0, floor in -2.0f64..0.0) {
        let config = SolverConfig::default().with_lower_bound(floor);

        let result = newton_raphson_best_effort(|x| x - target, |_| 1.0, 0.0, &config).unwrap();

        prop_assert!(result.root >= floor);
        prop_assert_eq!(result.converged, target >= floor);
    }

    #[test]
    fn strict_and_best_effort_agree_on_convergent_problems(c in 0.5f64..3.0) {
        let f = |x: f64| x.powi(3) - c;
        let df = |x: f64| 3.0 * x * x;
        let config = SolverConfig::default();

        let strict = newton_raphson(f, df, 1.0, &config).unwrap();
        let lenient = newton_raphson_best_effort(f, df, 1.0, &config).unwrap();

        prop_assert_eq!(strict.root.to_bits(), lenient.root.to_bits());
        prop_assert_eq!(strict.iterations, lenient.iterations);
    }

    #[test]
    fn long_horizon_discounting_survives_overflowing_steps(
        rate in 0.0f64..0.05,
        periods in 100i32..600,
    ) {
        // Growth to the target over `periods`; at the floor (1 + x)^-periods overflows
        let growth = (1.0 + rate).powi(periods);
        let f = |x: f64| growth / (1.0 + x).powi(periods) - 1.0;
        let df = |x: f64| -f64::from(periods) * growth / (1.0 + x).powi(periods + 1);
        let config = SolverConfig::default().with_lower_bound(-0.99);

        let result = newton_raphson(f, df, 0.10, &config).unwrap();

        prop_assert!((result.root - rate).abs() < 1e-9);
    }
}
