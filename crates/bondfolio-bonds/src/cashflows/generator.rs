//! Bullet ("American") cash flow generation.
//!
//! Every period pays the same coupon and the whole face value is repaid in
//! the final period. During a grace window:
//!
//! | Grace | Coupon | Principal |
//! |-------|--------|-----------|
//! | `partial` | paid | 0 |
//! | `total` | 0 | 0 |
//!
//! Coupons withheld under total grace are not capitalised; the face value is
//! unchanged and still repaid at maturity.

use bondfolio_core::types::GraceType;

use super::{CashFlowEntry, CashFlowSchedule};
use crate::error::BondResult;
use crate::terms::BondTerms;

/// Builds the period-by-period cash flow of a bullet bond.
///
/// The schedule always has exactly `terms.maturity_periods` entries.
///
/// # Errors
///
/// Returns an error if `terms` fails [`BondTerms::validate`].
pub fn generate_cash_flow(terms: &BondTerms) -> BondResult<CashFlowSchedule> {
    terms.validate()?;

    let coupon_payment = terms.coupon_payment();
    let maturity = terms.maturity_periods;

    let entries = (1..=maturity)
        .map(|period| {
            let is_last = period == maturity;

            let (coupon, principal_payment) = if terms.in_grace(period) {
                match terms.grace_type {
                    GraceType::Total => (0.0, 0.0),
                    GraceType::Partial | GraceType::None => (coupon_payment, 0.0),
                }
            } else if is_last {
                (coupon_payment, terms.nominal_value)
            } else {
                (coupon_payment, 0.0)
            };

            CashFlowEntry {
                period,
                coupon,
                principal_payment,
                total_payment: coupon + principal_payment,
                outstanding_balance: if is_last { 0.0 } else { terms.nominal_value },
            }
        })
        .collect();

    Ok(CashFlowSchedule::new(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(grace_periods: u32, grace_type: GraceType) -> BondTerms {
        BondTerms::builder()
            .nominal_value(1000.0)
            .coupon_rate(0.10)
            .maturity_periods(4)
            .frequency(1)
            .market_rate(0.12)
            .grace(grace_periods, grace_type)
            .build()
            .unwrap()
    }

    #[test]
    fn test_bullet_schedule() {
        let schedule = generate_cash_flow(&terms(0, GraceType::None)).unwrap();
        let e = schedule.entries();

        assert_eq!(e.len(), 4);
        for entry in &e[..3] {
            assert_eq!(entry.coupon, 100.0);
            assert_eq!(entry.principal_payment, 0.0);
            assert_eq!(entry.total_payment, 100.0);
            assert_eq!(entry.outstanding_balance, 1000.0);
        }
        assert_eq!(e[3].coupon, 100.0);
        assert_eq!(e[3].principal_payment, 1000.0);
        assert_eq!(e[3].total_payment, 1100.0);
        assert_eq!(e[3].outstanding_balance, 0.0);
    }

    #[test]
    fn test_total_grace() {
        let schedule = generate_cash_flow(&terms(1, GraceType::Total)).unwrap();
        let e = schedule.entries();

        assert_eq!(e[0].coupon, 0.0);
        assert_eq!(e[0].principal_payment, 0.0);
        assert_eq!(e[0].total_payment, 0.0);
        assert_eq!(e[0].outstanding_balance, 1000.0);
        assert_eq!(e[1].coupon, 100.0);
        assert_eq!(e[2].coupon, 100.0);
        assert_eq!(e[3].total_payment, 1100.0);
    }

    #[test]
    fn test_partial_grace() {
        let schedule = generate_cash_flow(&terms(3, GraceType::Partial)).unwrap();
        for entry in &schedule.entries()[..3] {
            assert_eq!(entry.coupon, 100.0);
            assert_eq!(entry.principal_payment, 0.0);
        }
        assert_eq!(schedule.entries()[3].principal_payment, 1000.0);
    }

    #[test]
    fn test_grace_count_without_grace_type_is_ignored() {
        let with_count = generate_cash_flow(&terms(2, GraceType::None)).unwrap();
        let plain = generate_cash_flow(&terms(0, GraceType::None)).unwrap();
        assert_eq!(with_count, plain);
    }

    #[test]
    fn test_single_period_bond() {
        let terms = BondTerms::builder()
            .nominal_value(500.0)
            .coupon_rate(0.08)
            .maturity_periods(1)
            .frequency(2)
            .market_rate(0.08)
            .build()
            .unwrap();
        let schedule = generate_cash_flow(&terms).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.entries()[0].total_payment, 520.0);
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let mut bad = terms(0, GraceType::None);
        bad.frequency = 0;
        assert!(generate_cash_flow(&bad).is_err());
    }
}
