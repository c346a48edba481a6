//! Present value of a cash flow schedule.
//!
//! ## Formula
//!
//! ```text
//! PV = Σ CF_p / (1 + y/f)^p
//! ```
//!
//! where `y` is the annual discount rate, `f` the payment frequency and `p`
//! the 1-indexed period.

use bondfolio_bonds::CashFlowSchedule;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Per-period rate `annual_rate / frequency`, checked so that `1 + rate` is
/// a usable discount base.
pub(crate) fn period_rate(annual_rate: f64, frequency: u32) -> AnalyticsResult<f64> {
    if frequency == 0 {
        return Err(AnalyticsError::invalid_input("frequency must be at least 1"));
    }
    if !annual_rate.is_finite() {
        return Err(AnalyticsError::invalid_input(format!(
            "discount rate must be finite, got {annual_rate}"
        )));
    }
    let rate = annual_rate / f64::from(frequency);
    if 1.0 + rate <= 0.0 {
        return Err(AnalyticsError::invalid_input(format!(
            "discount rate {annual_rate} makes the discount base non-positive"
        )));
    }
    Ok(rate)
}

/// Discount factor for period `p` at per-period rate `rate`.
#[inline]
pub(crate) fn discount_factor(rate: f64, period: u32) -> f64 {
    (1.0 + rate).powf(-f64::from(period))
}

/// Present value of each entry, paired with its period.
pub(crate) fn discounted_payments(
    schedule: &CashFlowSchedule,
    rate: f64,
) -> impl Iterator<Item = (f64, f64)> + '_ {
    schedule.iter().map(move |entry| {
        (
            f64::from(entry.period),
            entry.total_payment * discount_factor(rate, entry.period),
        )
    })
}

/// Present value of a schedule at an annual discount rate.
///
/// # Arguments
///
/// * `schedule` - Cash flows in period order
/// * `annual_rate` - Annual discount rate (as decimal, e.g. 0.12 for 12%)
/// * `frequency` - Payment periods per year
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] for a zero frequency or a rate
/// at or below `-frequency`.
///
/// # Example
///
/// ```rust
/// use bondfolio_analytics::pricing::present_value;
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
/// let schedule = generate_cash_flow(&terms).unwrap();
///
/// let pv = present_value(&schedule, 0.12, 1).unwrap();
/// assert!((pv - 939.25).abs() < 0.01);
/// ```
pub fn present_value(
    schedule: &CashFlowSchedule,
    annual_rate: f64,
    frequency: u32,
) -> AnalyticsResult<f64> {
    let rate = period_rate(annual_rate, frequency)?;
    Ok(discounted_payments(schedule, rate).map(|(_, pv)| pv).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::risk::test_support::schedule;

    #[test]
    fn test_zero_rate_is_plain_sum() {
        let s = schedule(&[10.0, 10.0, 110.0]);
        assert_relative_eq!(present_value(&s, 0.0, 2).unwrap(), 130.0);
    }

    #[test]
    fn test_par_bond() {
        // 5% semi-annual coupon discounted at 5% prices at par
        let s = schedule(&[2.5, 2.5, 2.5, 102.5]);
        assert_relative_eq!(present_value(&s, 0.05, 2).unwrap(), 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rejects_zero_frequency() {
        let s = schedule(&[100.0]);
        assert!(matches!(
            present_value(&s, 0.05, 0),
            Err(AnalyticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_non_positive_base() {
        let s = schedule(&[100.0]);
        assert!(present_value(&s, -1.0, 1).is_err());
        assert!(present_value(&s, f64::NAN, 1).is_err());
    }
}
