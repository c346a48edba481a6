//! Interest rate risk measures.
//!
//! - [`macaulay_duration`], [`modified_duration`]: first-order sensitivity
//! - [`convexity`]: second-order sensitivity
//! - [`price_metrics`]: price, durations and convexity in one pass
//!
//! All measures discount at `annual_rate / frequency` per period and report
//! in years.

mod convexity;
mod duration;

pub use convexity::{convexity, price_change_with_convexity};
pub use duration::{
    macaulay_duration, modified_duration, modified_from_macaulay, price_change_from_duration,
};

use serde::{Deserialize, Serialize};

use bondfolio_bonds::CashFlowSchedule;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::pricing::{discounted_payments, period_rate};

/// Present values below this magnitude make the ratio measures undefined.
pub const MIN_PRESENT_VALUE: f64 = 1e-12;

/// Price and risk measures of a schedule at one discount rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceMetrics {
    /// Present value.
    pub present_value: f64,
    /// Macaulay duration in years.
    pub duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Convexity in years squared.
    pub convexity: f64,
}

/// Discounted sums shared by every measure.
struct Moments {
    rate: f64,
    present_value: f64,
    /// Σ p · PV_p
    first: f64,
    /// Σ p(p+1) · PV_p
    second: f64,
}

impl Moments {
    fn compute(
        schedule: &CashFlowSchedule,
        annual_rate: f64,
        frequency: u32,
    ) -> AnalyticsResult<Self> {
        let rate = period_rate(annual_rate, frequency)?;

        let (present_value, first, second) = discounted_payments(schedule, rate).fold(
            (0.0, 0.0, 0.0),
            |(pv, first, second), (p, pv_p)| {
                (pv + pv_p, first + p * pv_p, second + p * (p + 1.0) * pv_p)
            },
        );

        if present_value.abs() < MIN_PRESENT_VALUE {
            return Err(AnalyticsError::DegenerateCashFlow { present_value });
        }

        Ok(Self {
            rate,
            present_value,
            first,
            second,
        })
    }
}

/// Computes present value, Macaulay and modified duration, and convexity.
///
/// # Errors
///
/// - [`AnalyticsError::InvalidInput`] for a zero frequency or an unusable rate
/// - [`AnalyticsError::DegenerateCashFlow`] if the present value is zero
pub fn price_metrics(
    schedule: &CashFlowSchedule,
    annual_rate: f64,
    frequency: u32,
) -> AnalyticsResult<PriceMetrics> {
    let m = Moments::compute(schedule, annual_rate, frequency)?;
    let f = f64::from(frequency);

    let duration = m.first / m.present_value / f;
    Ok(PriceMetrics {
        present_value: m.present_value,
        duration,
        modified_duration: duration / (1.0 + m.rate),
        convexity: m.second / m.present_value / (f * f),
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::schedule;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_metrics_match_individual_functions() {
        let s = schedule(&[100.0, 100.0, 100.0, 1100.0]);
        let m = price_metrics(&s, 0.12, 1).unwrap();

        assert_relative_eq!(m.duration, macaulay_duration(&s, 0.12, 1).unwrap());
        assert_relative_eq!(m.modified_duration, modified_duration(&s, 0.12, 1).unwrap());
        assert_relative_eq!(m.convexity, convexity(&s, 0.12, 1).unwrap());
    }

    #[test]
    fn test_scenario_values() {
        let s = schedule(&[100.0, 100.0, 100.0, 1100.0]);
        let m = price_metrics(&s, 0.12, 1).unwrap();

        assert_relative_eq!(m.present_value, 939.253_013, epsilon = 1e-5);
        assert_relative_eq!(m.duration, 3.469_287, epsilon = 1e-5);
        assert_relative_eq!(m.modified_duration, 3.469_287 / 1.12, epsilon = 1e-5);
        assert_relative_eq!(m.convexity, 16.494_407, epsilon = 1e-5);
    }

    #[test]
    fn test_zero_coupon_duration_is_maturity() {
        let s = schedule(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 100.0]);
        let m = price_metrics(&s, 0.06, 2).unwrap();

        assert_relative_eq!(m.duration, 5.0, epsilon = 1e-12);
        // p(p+1)/f^2 for the single payment
        assert_relative_eq!(m.convexity, 110.0 / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_all_zero_schedule_is_degenerate() {
        let s = schedule(&[0.0, 0.0, 0.0]);
        let err = price_metrics(&s, 0.05, 1).unwrap_err();
        assert!(matches!(err, AnalyticsError::DegenerateCashFlow { .. }));
    }

    #[test]
    fn test_empty_schedule_is_degenerate() {
        let s = CashFlowSchedule::default();
        assert!(matches!(
            price_metrics(&s, 0.05, 1),
            Err(AnalyticsError::DegenerateCashFlow { .. })
        ));
    }
}
