//! Macaulay and modified duration.
//!
//! ## Formulas
//!
//! ```text
//! D_mac = Σ p · PV_p / PV / f
//! D_mod = D_mac / (1 + y/f)
//! ```
//!
//! where `PV_p = CF_p / (1 + y/f)^p`, `y` is the annual rate and `f` the
//! payment frequency.

use bondfolio_bonds::CashFlowSchedule;

use super::Moments;
use crate::error::AnalyticsResult;

/// Macaulay duration in years.
///
/// # Arguments
///
/// * `schedule` - Cash flows in period order
/// * `annual_rate` - Annual discount rate (as decimal)
/// * `frequency` - Payment periods per year
pub fn macaulay_duration(
    schedule: &CashFlowSchedule,
    annual_rate: f64,
    frequency: u32,
) -> AnalyticsResult<f64> {
    let m = Moments::compute(schedule, annual_rate, frequency)?;
    Ok(m.first / m.present_value / f64::from(frequency))
}

/// Modified duration: percentage price change per unit change in yield.
pub fn modified_duration(
    schedule: &CashFlowSchedule,
    annual_rate: f64,
    frequency: u32,
) -> AnalyticsResult<f64> {
    let m = Moments::compute(schedule, annual_rate, frequency)?;
    let mac = m.first / m.present_value / f64::from(frequency);
    Ok(mac / (1.0 + m.rate))
}

/// Converts Macaulay duration to modified duration.
pub fn modified_from_macaulay(macaulay: f64, annual_rate: f64, frequency: u32) -> f64 {
    macaulay / (1.0 + annual_rate / f64::from(frequency))
}

/// Approximate price change using modified duration.
///
/// # Arguments
///
/// * `mod_duration` - Modified duration
/// * `price` - Current price
/// * `yield_change` - Change in yield (as decimal, e.g., 0.01 for 100bps)
pub fn price_change_from_duration(mod_duration: f64, price: f64, yield_change: f64) -> f64 {
    -mod_duration * price * yield_change
}
