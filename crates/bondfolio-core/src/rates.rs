//! Interest rate conversions.
//!
//! Rates are decimals (`0.10` is 10%). `k` is the number of compounding
//! periods per year.
//!
//! ```text
//! effective = (1 + nominal / k)^k - 1
//! nominal   = k * ((1 + effective)^(1/k) - 1)
//! ```

use crate::error::{CoreError, CoreResult};

fn check_periods(periods_per_year: u32) -> CoreResult<f64> {
    if periods_per_year == 0 {
        return Err(CoreError::InvalidFrequency(periods_per_year));
    }
    Ok(f64::from(periods_per_year))
}

fn check_base(rate: f64, base: f64) -> CoreResult<()> {
    if !rate.is_finite() {
        return Err(CoreError::invalid_rate(rate, "rate is not finite"));
    }
    if base <= 0.0 {
        return Err(CoreError::invalid_rate(
            rate,
            "compounding base is not positive",
        ));
    }
    Ok(())
}

/// Converts a nominal annual rate compounded `capitalization` times a year
/// into the equivalent effective annual rate.
///
/// # Example
///
/// ```rust
/// use bondfolio_core::rates::nominal_to_effective;
///
/// let eff = nominal_to_effective(0.10, 2).unwrap();
/// assert!((eff - 0.1025).abs() < 1e-12);
/// ```
pub fn nominal_to_effective(nominal_rate: f64, capitalization: u32) -> CoreResult<f64> {
    let k = check_periods(capitalization)?;
    let base = 1.0 + nominal_rate / k;
    check_base(nominal_rate, base)?;
    Ok(base.powf(k) - 1.0)
}

/// Converts an effective annual rate into the nominal annual rate compounded
/// `capitalization` times a year. Requires `effective_rate > -1`.
pub fn effective_to_nominal(effective_rate: f64, capitalization: u32) -> CoreResult<f64> {
    let k = check_periods(capitalization)?;
    check_base(effective_rate, 1.0 + effective_rate)?;
    Ok(k * ((1.0 + effective_rate).powf(1.0 / k) - 1.0))
}

/// Converts an effective annual rate into the equivalent rate per period.
pub fn effective_to_periodic(effective_rate: f64, periods_per_year: u32) -> CoreResult<f64> {
    let n = check_periods(periods_per_year)?;
    check_base(effective_rate, 1.0 + effective_rate)?;
    Ok((1.0 + effective_rate).powf(1.0 / n) - 1.0)
}

/// Compounds a per-period rate into an effective annual rate.
pub fn periodic_to_effective(periodic_rate: f64, periods_per_year: u32) -> CoreResult<f64> {
    let n = check_periods(periods_per_year)?;
    check_base(periodic_rate, 1.0 + periodic_rate)?;
    Ok((1.0 + periodic_rate).powf(n) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nominal_to_effective_monthly() {
        // 12% TNA capitalised monthly -> 12.6825% TEA
        let eff = nominal_to_effective(0.12, 12).unwrap();
        assert_relative_eq!(eff, 0.126_825_030_131_97, epsilon = 1e-12);
    }

    #[test]
    fn test_annual_compounding_is_identity() {
        assert_relative_eq!(nominal_to_effective(0.08, 1).unwrap(), 0.08, epsilon = 1e-15);
        assert_relative_eq!(effective_to_nominal(0.08, 1).unwrap(), 0.08, epsilon = 1e-15);
    }

    #[test]
    fn test_effective_to_nominal_semi_annual() {
        let nom = effective_to_nominal(0.1025, 2).unwrap();
        assert_relative_eq!(nom, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate() {
        assert_eq!(nominal_to_effective(0.0, 4).unwrap(), 0.0);
        assert_eq!(effective_to_nominal(0.0, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_capitalization_rejected() {
        assert_eq!(
            nominal_to_effective(0.1, 0),
            Err(CoreError::InvalidFrequency(0))
        );
        assert!(effective_to_nominal(0.1, 0).is_err());
    }

    #[test]
    fn test_non_positive_base_rejected() {
        // nominal <= -k makes the base non-positive
        assert!(nominal_to_effective(-2.0, 2).is_err());
        assert!(effective_to_nominal(-1.0, 12).is_err());
        assert!(nominal_to_effective(f64::NAN, 12).is_err());
    }

    #[test]
    fn test_periodic_conversions() {
        let periodic = effective_to_periodic(0.21, 2).unwrap();
        assert_relative_eq!(periodic, 0.10, epsilon = 1e-12);
        assert_relative_eq!(periodic_to_effective(0.10, 2).unwrap(), 0.21, epsilon = 1e-12);
    }
}
