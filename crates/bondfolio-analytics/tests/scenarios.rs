//! End-to-end valuation scenarios.

use approx::assert_relative_eq;
use bondfolio_analytics::prelude::*;
use bondfolio_bonds::prelude::*;

fn four_year_bond() -> BondTermsBuilder {
    BondTerms::builder()
        .nominal_value(1000.0)
        .coupon_rate(0.10)
        .maturity_periods(4)
        .frequency(1)
        .market_rate(0.12)
}

#[test]
fn plain_bullet_bond() {
    let result = analyze_bond(&four_year_bond().build().unwrap()).unwrap();

    let entries = result.cash_flow.entries();
    assert_eq!(entries.len(), 4);
    for entry in &entries[..3] {
        assert_eq!(entry.coupon, 100.0);
        assert_eq!(entry.principal_payment, 0.0);
    }
    assert_eq!(entries[3].coupon, 100.0);
    assert_eq!(entries[3].principal_payment, 1000.0);
    assert_eq!(entries[3].total_payment, 1100.0);

    // 100/1.12 + 100/1.12^2 + 100/1.12^3 + 1100/1.12^4
    assert_relative_eq!(result.present_value, 939.25, epsilon = 0.01);
}

#[test]
fn total_grace_bond() {
    let terms = four_year_bond()
        .grace(1, GraceType::Total)
        .build()
        .unwrap();
    let result = analyze_bond(&terms).unwrap();

    let first = result.cash_flow.entries()[0];
    assert_eq!(first.coupon, 0.0);
    assert_eq!(first.principal_payment, 0.0);
    assert_eq!(first.total_payment, 0.0);
    assert_eq!(result.cash_flow.amounts(), vec![0.0, 100.0, 100.0, 1100.0]);

    assert_relative_eq!(result.present_value, 939.25 - 100.0 / 1.12, epsilon = 0.01);
}

#[test]
fn bought_at_present_value_returns_market_rate() {
    let result = analyze_bond(&four_year_bond().build().unwrap()).unwrap();

    assert!(result.return_rate.converged);
    assert_relative_eq!(result.return_rate.annual_rate, 0.12, max_relative = 1e-6);
}

#[test]
fn semiannual_return_rate_is_annualized() {
    let terms = four_year_bond()
        .frequency(2)
        .maturity_periods(8)
        .build()
        .unwrap();
    let result = analyze_bond(&terms).unwrap();

    assert_relative_eq!(result.return_rate.nominal_rate, 0.12, max_relative = 1e-6);
    assert_relative_eq!(
        result.return_rate.annual_rate,
        1.06_f64.powi(2) - 1.0,
        max_relative = 1e-6
    );
}

#[test]
fn serializes_for_export() {
    let result = analyze_bond(&four_year_bond().build().unwrap()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["cash_flow"].as_array().unwrap().len(), 4);
    assert_eq!(json["cash_flow"][3]["total_payment"], 1100.0);
    assert!(json["return_rate"]["converged"].as_bool().unwrap());
}
