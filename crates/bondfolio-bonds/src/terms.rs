//! Bond terms.
//!
//! A [`BondTerms`] value is an immutable snapshot of everything the valuation
//! engine needs. Rates are decimals (`0.10` is 10%).

use serde::{Deserialize, Serialize};

use bondfolio_core::types::{GraceType, InterestType};

use crate::error::{BondError, BondResult};

/// Transaction costs, as fractions of the bond price.
///
/// Issuer costs (structuring, placement, listing) reduce the net proceeds the
/// issuer receives; investor costs (brokerage, custody) increase the outlay
/// the investor pays.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionCosts {
    /// Issuer-side costs as a fraction of price.
    #[serde(default)]
    pub issuer: f64,
    /// Investor-side costs as a fraction of price.
    #[serde(default)]
    pub investor: f64,
}

impl TransactionCosts {
    /// No transaction costs.
    pub const NONE: Self = Self {
        issuer: 0.0,
        investor: 0.0,
    };

    /// Creates transaction costs.
    #[must_use]
    pub fn new(issuer: f64, investor: f64) -> Self {
        Self { issuer, investor }
    }

    /// Net proceeds received by the issuer for a given price.
    #[must_use]
    pub fn issuer_proceeds(&self, price: f64) -> f64 {
        price * (1.0 - self.issuer)
    }

    /// Gross outlay paid by the investor for a given price.
    #[must_use]
    pub fn investor_outlay(&self, price: f64) -> f64 {
        price * (1.0 + self.investor)
    }
}

/// Terms of a bullet bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    /// Face value.
    pub nominal_value: f64,
    /// Annual coupon rate; each period pays `nominal_value * coupon_rate / frequency`.
    pub coupon_rate: f64,
    /// Total number of payment periods.
    pub maturity_periods: u32,
    /// Payment periods per year (1, 2, 4, 12, ...).
    pub frequency: u32,
    /// Annual market discount rate, read according to `interest_type`.
    pub market_rate: f64,
    /// Number of initial periods under grace treatment.
    #[serde(default)]
    pub grace_periods: u32,
    /// Treatment applied during the grace window.
    #[serde(default)]
    pub grace_type: GraceType,
    /// How `market_rate` is quoted.
    #[serde(default)]
    pub interest_type: InterestType,
    /// Transaction costs for the issuer and the investor.
    #[serde(default)]
    pub costs: TransactionCosts,
}

impl BondTerms {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BondTermsBuilder {
        BondTermsBuilder::default()
    }

    /// Coupon paid every non-suspended period.
    #[must_use]
    pub fn coupon_payment(&self) -> f64 {
        self.nominal_value * self.coupon_rate / f64::from(self.frequency)
    }

    /// Years until maturity.
    #[must_use]
    pub fn years_to_maturity(&self) -> f64 {
        f64::from(self.maturity_periods) / f64::from(self.frequency)
    }

    /// Returns true if `period` (1-indexed) falls in an active grace window.
    ///
    /// A grace count with `GraceType::None` has no effect.
    #[must_use]
    pub fn in_grace(&self, period: u32) -> bool {
        self.grace_type != GraceType::None && period <= self.grace_periods
    }

    /// The market rate as an effective annual rate.
    pub fn effective_market_rate(&self) -> BondResult<f64> {
        Ok(self.interest_type.effective_rate(self.market_rate)?)
    }

    /// Checks every invariant the valuation engine relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> BondResult<()> {
        if !self.nominal_value.is_finite() || self.nominal_value <= 0.0 {
            return Err(BondError::invalid_spec("nominal_value must be positive"));
        }
        if !self.coupon_rate.is_finite() || self.coupon_rate < 0.0 {
            return Err(BondError::invalid_spec("coupon_rate cannot be negative"));
        }
        if !self.market_rate.is_finite() || self.market_rate < 0.0 {
            return Err(BondError::invalid_spec("market_rate cannot be negative"));
        }
        if self.maturity_periods == 0 {
            return Err(BondError::invalid_spec(
                "maturity_periods must be at least 1",
            ));
        }
        if self.frequency == 0 {
            return Err(BondError::invalid_spec("frequency must be at least 1"));
        }
        if self.grace_periods >= self.maturity_periods {
            return Err(BondError::GraceBeyondMaturity {
                grace_periods: self.grace_periods,
                maturity_periods: self.maturity_periods,
            });
        }
        if let InterestType::Nominal { capitalization: 0 } = self.interest_type {
            return Err(BondError::invalid_spec(
                "capitalization must be positive for nominal rates",
            ));
        }
        for (side, cost) in [
            ("issuer", self.costs.issuer),
            ("investor", self.costs.investor),
        ] {
            if !cost.is_finite() || !(0.0..1.0).contains(&cost) {
                return Err(BondError::invalid_spec(format!(
                    "{side} costs must be in [0, 1)"
                )));
            }
        }
        if self.grace_periods > 0 && self.grace_type == GraceType::None {
            log::debug!(
                "grace_periods = {} with grace type none; periods are treated as normal",
                self.grace_periods
            );
        }
        Ok(())
    }
}

/// Builder for [`BondTerms`].
#[derive(Debug, Clone, Default)]
pub struct BondTermsBuilder {
    nominal_value: Option<f64>,
    coupon_rate: Option<f64>,
    maturity_periods: Option<u32>,
    frequency: Option<u32>,
    market_rate: Option<f64>,
    grace_periods: u32,
    grace_type: GraceType,
    interest_type: InterestType,
    costs: TransactionCosts,
}

impl BondTermsBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the face value.
    pub fn nominal_value(mut self, value: f64) -> Self {
        self.nominal_value = Some(value);
        self
    }

    /// Sets the annual coupon rate.
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the number of payment periods.
    pub fn maturity_periods(mut self, periods: u32) -> Self {
        self.maturity_periods = Some(periods);
        self
    }

    /// Sets the payment periods per year.
    pub fn frequency(mut self, frequency: u32) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the market discount rate.
    pub fn market_rate(mut self, rate: f64) -> Self {
        self.market_rate = Some(rate);
        self
    }

    /// Sets the grace window.
    pub fn grace(mut self, periods: u32, grace_type: GraceType) -> Self {
        self.grace_periods = periods;
        self.grace_type = grace_type;
        self
    }

    /// Sets how the market rate is quoted.
    pub fn interest_type(mut self, interest_type: InterestType) -> Self {
        self.interest_type = interest_type;
        self
    }

    /// Sets the transaction costs.
    pub fn costs(mut self, costs: TransactionCosts) -> Self {
        self.costs = costs;
        self
    }

    /// Builds and validates the terms.
    pub fn build(self) -> BondResult<BondTerms> {
        let terms = BondTerms {
            nominal_value: self
                .nominal_value
                .ok_or_else(|| BondError::missing_field("nominal_value"))?,
            coupon_rate: self
                .coupon_rate
                .ok_or_else(|| BondError::missing_field("coupon_rate"))?,
            maturity_periods: self
                .maturity_periods
                .ok_or_else(|| BondError::missing_field("maturity_periods"))?,
            frequency: self
                .frequency
                .ok_or_else(|| BondError::missing_field("frequency"))?,
            market_rate: self
                .market_rate
                .ok_or_else(|| BondError::missing_field("market_rate"))?,
            grace_periods: self.grace_periods,
            grace_type: self.grace_type,
            interest_type: self.interest_type,
            costs: self.costs,
        };
        terms.validate()?;
        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> BondTermsBuilder {
        BondTerms::builder()
            .nominal_value(1000.0)
            .coupon_rate(0.10)
            .maturity_periods(8)
            .frequency(2)
            .market_rate(0.12)
    }

    #[test]
    fn test_builder_defaults() {
        let terms = sample().build().unwrap();
        assert_eq!(terms.grace_periods, 0);
        assert_eq!(terms.grace_type, GraceType::None);
        assert_eq!(terms.interest_type, InterestType::Effective);
        assert_eq!(terms.costs, TransactionCosts::NONE);
    }

    #[test]
    fn test_derived_values() {
        let terms = sample().build().unwrap();
        assert_relative_eq!(terms.coupon_payment(), 50.0);
        assert_relative_eq!(terms.years_to_maturity(), 4.0);
    }

    #[test]
    fn test_missing_field() {
        let err = BondTerms::builder().nominal_value(1000.0).build().unwrap_err();
        assert_eq!(err, BondError::missing_field("coupon_rate"));
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert!(sample().nominal_value(0.0).build().is_err());
        assert!(sample().nominal_value(f64::NAN).build().is_err());
        assert!(sample().coupon_rate(-0.01).build().is_err());
        assert!(sample().market_rate(-0.01).build().is_err());
        assert!(sample().maturity_periods(0).build().is_err());
        assert!(sample().frequency(0).build().is_err());
        assert!(sample()
            .interest_type(InterestType::Nominal { capitalization: 0 })
            .build()
            .is_err());
        assert!(sample()
            .costs(TransactionCosts::new(1.0, 0.0))
            .build()
            .is_err());
        assert!(sample()
            .costs(TransactionCosts::new(0.0, -0.1))
            .build()
            .is_err());
    }

    #[test]
    fn test_grace_must_end_before_maturity() {
        let err = sample().grace(8, GraceType::Partial).build().unwrap_err();
        assert!(matches!(err, BondError::GraceBeyondMaturity { .. }));
        assert!(sample().grace(7, GraceType::Total).build().is_ok());
    }

    #[test]
    fn test_in_grace() {
        let terms = sample().grace(2, GraceType::Total).build().unwrap();
        assert!(terms.in_grace(1));
        assert!(terms.in_grace(2));
        assert!(!terms.in_grace(3));

        let no_grace = sample().grace(2, GraceType::None).build().unwrap();
        assert!(!no_grace.in_grace(1));
    }

    #[test]
    fn test_effective_market_rate() {
        let terms = sample()
            .interest_type(InterestType::Nominal { capitalization: 2 })
            .market_rate(0.10)
            .build()
            .unwrap();
        assert_relative_eq!(terms.effective_market_rate().unwrap(), 0.1025, epsilon = 1e-12);
    }

    #[test]
    fn test_costs() {
        let costs = TransactionCosts::new(0.02, 0.01);
        assert_relative_eq!(costs.issuer_proceeds(1000.0), 980.0);
        assert_relative_eq!(costs.investor_outlay(1000.0), 1010.0);
    }

    #[test]
    fn test_serde_defaults() {
        let json = r#"{
            "nominal_value": 1000.0,
            "coupon_rate": 0.1,
            "maturity_periods": 4,
            "frequency": 1,
            "market_rate": 0.12
        }"#;
        let terms: BondTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.grace_type, GraceType::None);
        assert_eq!(terms.costs, TransactionCosts::NONE);
        assert!(terms.validate().is_ok());
    }
}
