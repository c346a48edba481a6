//! Analytical convexity.
//!
//! ```text
//! C = Σ p(p+1) · PV_p / PV / f²
//! ```

use bondfolio_bonds::CashFlowSchedule;

use super::Moments;
use crate::error::AnalyticsResult;

/// Convexity in years squared.
pub fn convexity(
    schedule: &CashFlowSchedule,
    annual_rate: f64,
    frequency: u32,
) -> AnalyticsResult<f64> {
    let m = Moments::compute(schedule, annual_rate, frequency)?;
    let f = f64::from(frequency);
    Ok(m.second / m.present_value / (f * f))
}

/// Price change estimate including the convexity adjustment.
///
/// ```text
/// ΔP ≈ P · (-D_mod · Δy + ½ · C · Δy²)
/// ```
pub fn price_change_with_convexity(
    mod_duration: f64,
    convexity: f64,
    price: f64,
    yield_change: f64,
) -> f64 {
    price * (-mod_duration * yield_change + 0.5 * convexity * yield_change * yield_change)
}
