//! Full valuation of a bond.
//!
//! [`analyze_bond`] runs the whole pipeline:
//!
//! 1. validate the terms
//! 2. convert the market rate to an effective annual rate
//! 3. generate the bullet cash flow
//! 4. price, duration, modified duration and convexity at the market rate
//! 5. issuer cost rate (TCEA) against the net issuance proceeds
//! 6. investor return rate (TREA) against the gross purchase outlay
//! 7. maximum market price: the schedule discounted at the coupon rate

use serde::{Deserialize, Serialize};

use bondfolio_bonds::{generate_cash_flow, BondTerms, CashFlowSchedule};

use crate::error::AnalyticsResult;
use crate::pricing::present_value;
use crate::risk::price_metrics;
use crate::yields::{IrrSolver, YieldPerspective, YieldSolution};

/// How a summary value should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryUnit {
    /// A monetary amount.
    Amount,
    /// A rate, shown as a percentage.
    Percent,
    /// A length of time in years.
    Years,
    /// A dimensionless number.
    Plain,
}

/// One labelled scalar of a [`ValuationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryField {
    /// Display label.
    pub label: &'static str,
    /// Raw value (rates as decimals).
    pub value: f64,
    /// Display unit.
    pub unit: SummaryUnit,
}

/// Everything computed for one bond.
///
/// Recomputed on every request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationResult {
    /// The bullet cash flow.
    pub cash_flow: CashFlowSchedule,
    /// Price at the market rate.
    pub present_value: f64,
    /// Macaulay duration in years.
    pub duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Convexity.
    pub convexity: f64,
    /// Issuer cost rate (TCEA).
    pub cost_rate: YieldSolution,
    /// Investor return rate (TREA).
    pub return_rate: YieldSolution,
    /// Price if the market demanded exactly the coupon rate.
    pub max_market_price: f64,
    /// Market rate used for discounting, as an effective annual rate.
    pub effective_market_rate: f64,
}

impl ValuationResult {
    /// The scalar results in display order.
    #[must_use]
    pub fn summary(&self) -> Vec<SummaryField> {
        use SummaryUnit::{Amount, Percent, Plain, Years};

        let field = |label, value, unit| SummaryField { label, value, unit };
        vec![
            field("TCEA (issuer cost)", self.cost_rate.annual_rate, Percent),
            field("TREA (investor return)", self.return_rate.annual_rate, Percent),
            field("Bond price", self.present_value, Amount),
            field("Max market price", self.max_market_price, Amount),
            field("Duration", self.duration, Years),
            field("Modified duration", self.modified_duration, Plain),
            field("Convexity", self.convexity, Plain),
            field("Effective market rate", self.effective_market_rate, Percent),
        ]
    }

    /// Returns true if both rate solves converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.cost_rate.converged && self.return_rate.converged
    }
}

/// Values a bond with the default IRR solver.
///
/// # Errors
///
/// Fails if the terms are invalid or a computation is degenerate. A
/// non-converged rate solve is not an error; see [`YieldSolution::converged`].
///
/// # Example
///
/// ```rust
/// use bondfolio_analytics::analyze_bond;
/// use bondfolio_bonds::prelude::*;
///
/// let terms = BondTerms::builder()
///     .nominal_value(1000.0)
///     .coupon_rate(0.10)
///     .maturity_periods(4)
///     .frequency(1)
///     .market_rate(0.12)
///     .build()
///     .unwrap();
///
/// let result = analyze_bond(&terms).unwrap();
/// assert!((result.present_value - 939.25).abs() < 0.01);
/// assert!((result.return_rate.annual_rate - 0.12).abs() < 1e-6);
/// ```
pub fn analyze_bond(terms: &BondTerms) -> AnalyticsResult<ValuationResult> {
    analyze_bond_with(terms, &IrrSolver::default())
}

/// Values a bond with a custom IRR solver.
pub fn analyze_bond_with(
    terms: &BondTerms,
    solver: &IrrSolver,
) -> AnalyticsResult<ValuationResult> {
    // Validates the terms as well
    let cash_flow = generate_cash_flow(terms)?;

    let effective_market_rate = terms.effective_market_rate()?;
    let frequency = terms.frequency;
    let metrics = price_metrics(&cash_flow, effective_market_rate, frequency)?;

    let proceeds = terms.costs.issuer_proceeds(metrics.present_value);
    let cost_rate = solver.solve(&cash_flow, proceeds, frequency, YieldPerspective::Issuer)?;

    let outlay = terms.costs.investor_outlay(metrics.present_value);
    let return_rate = solver.solve(&cash_flow, outlay, frequency, YieldPerspective::Investor)?;

    let max_market_price = present_value(&cash_flow, terms.coupon_rate, frequency)?;

    log::debug!(
        "valued bond: pv={:.6} tcea={:.6} trea={:.6}",
        metrics.present_value,
        cost_rate.annual_rate,
        return_rate.annual_rate
    );

    Ok(ValuationResult {
        cash_flow,
        present_value: metrics.present_value,
        duration: metrics.duration,
        modified_duration: metrics.modified_duration,
        convexity: metrics.convexity,
        cost_rate,
        return_rate,
        max_market_price,
        effective_market_rate,
    })
}

/// Values a batch of bonds in parallel.
#[cfg(feature = "parallel")]
pub fn analyze_many(terms: &[BondTerms]) -> Vec<AnalyticsResult<ValuationResult>> {
    use rayon::prelude::*;

    terms.par_iter().map(analyze_bond).collect()
}

/// Values a batch of bonds sequentially.
#[cfg(not(feature = "parallel"))]
pub fn analyze_many(terms: &[BondTerms]) -> Vec<AnalyticsResult<ValuationResult>> {
    terms.iter().map(analyze_bond).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use approx::assert_relative_eq;
    use bondfolio_bonds::TransactionCosts;
    use bondfolio_core::types::{GraceType, InterestType};

    fn scenario() -> BondTerms {
        BondTerms::builder()
            .nominal_value(1000.0)
            .coupon_rate(0.10)
            .maturity_periods(4)
            .frequency(1)
            .market_rate(0.12)
            .build()
            .unwrap()
    }

    #[test]
    fn test_scenario() {
        let result = analyze_bond(&scenario()).unwrap();

        assert_eq!(result.cash_flow.amounts(), vec![100.0, 100.0, 100.0, 1100.0]);
        assert_relative_eq!(result.present_value, 939.253_013, epsilon = 1e-5);
        assert_relative_eq!(result.effective_market_rate, 0.12);
        assert!(result.converged());
    }

    #[test]
    fn test_rates_recover_market_rate_without_costs() {
        let result = analyze_bond(&scenario()).unwrap();

        assert_relative_eq!(result.return_rate.annual_rate, 0.12, max_relative = 1e-6);
        assert_relative_eq!(result.cost_rate.annual_rate, 0.12, max_relative = 1e-6);
    }

    #[test]
    fn test_max_market_price_discounts_at_coupon() {
        // A 10% coupon discounted at 10% prices at par
        let result = analyze_bond(&scenario()).unwrap();
        assert_relative_eq!(result.max_market_price, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_costs_split_issuer_and_investor_rates() {
        let mut terms = scenario();
        terms.costs = TransactionCosts::new(0.02, 0.01);

        let result = analyze_bond(&terms).unwrap();

        // Issuer receives less, so borrowing costs more
        assert!(result.cost_rate.annual_rate > 0.12);
        // Investor pays more, so earns less
        assert!(result.return_rate.annual_rate < 0.12);
    }

    #[test]
    fn test_nominal_market_rate_is_converted() {
        let mut terms = scenario();
        terms.interest_type = InterestType::Nominal { capitalization: 12 };

        let result = analyze_bond(&terms).unwrap();

        let expected = (1.0_f64 + 0.12 / 12.0).powi(12) - 1.0;
        assert_relative_eq!(result.effective_market_rate, expected, epsilon = 1e-12);
        assert!(result.present_value < analyze_bond(&scenario()).unwrap().present_value);
    }

    #[test]
    fn test_grace_reduces_price() {
        let mut terms = scenario();
        terms.grace_periods = 2;
        terms.grace_type = GraceType::Total;

        let with_grace = analyze_bond(&terms).unwrap();
        let plain = analyze_bond(&scenario()).unwrap();

        assert!(with_grace.present_value < plain.present_value);
        assert!(with_grace.duration > plain.duration);
    }

    #[test]
    fn test_invalid_terms_are_rejected() {
        let mut terms = scenario();
        terms.grace_periods = 4;
        terms.grace_type = GraceType::Partial;

        assert!(matches!(analyze_bond(&terms), Err(AnalyticsError::Bond(_))));
    }

    #[test]
    fn test_zero_capitalization_is_rejected() {
        let mut terms = scenario();
        terms.interest_type = InterestType::Nominal { capitalization: 0 };

        assert!(matches!(analyze_bond(&terms), Err(AnalyticsError::Bond(_))));
    }

    #[test]
    fn test_long_bond_at_zero_market_rate() {
        let terms = BondTerms::builder()
            .nominal_value(1000.0)
            .coupon_rate(0.10)
            .maturity_periods(200)
            .frequency(1)
            .market_rate(0.0)
            .build()
            .unwrap();

        let result = analyze_bond(&terms).unwrap();

        assert_relative_eq!(result.present_value, 21_000.0, epsilon = 1e-6);
        assert!(result.converged());
        assert_relative_eq!(result.return_rate.nominal_rate, 0.0, epsilon = 1e-9);
        assert_relative_eq!(result.cost_rate.nominal_rate, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_long_low_rate_bond_solves() {
        let terms = BondTerms::builder()
            .nominal_value(1000.0)
            .coupon_rate(0.05)
            .maturity_periods(480)
            .frequency(1)
            .market_rate(0.01)
            .build()
            .unwrap();

        let result = analyze_bond(&terms).unwrap();
        assert_relative_eq!(result.return_rate.annual_rate, 0.01, max_relative = 1e-6);
    }

    #[test]
    fn test_summary_order() {
        let result = analyze_bond(&scenario()).unwrap();
        let summary = result.summary();

        assert_eq!(summary.len(), 8);
        assert_eq!(summary[0].label, "TCEA (issuer cost)");
        assert_eq!(summary[2].value, result.present_value);
        assert_eq!(summary[4].unit, SummaryUnit::Years);
    }

    #[test]
    fn test_analyze_many_keeps_order() {
        let mut second = scenario();
        second.market_rate = 0.08;
        let mut bad = scenario();
        bad.frequency = 0;

        let results = analyze_many(&[scenario(), second, bad]);

        assert_eq!(results.len(), 3);
        let first = results[0].as_ref().unwrap();
        let second = results[1].as_ref().unwrap();
        assert!(first.present_value < second.present_value);
        assert!(results[2].is_err());
    }
}
