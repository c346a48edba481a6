//! Cash flow schedule types.

use serde::{Deserialize, Serialize};

/// One period of a bond's cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    /// Period number, starting at 1.
    pub period: u32,
    /// Interest paid this period.
    pub coupon: f64,
    /// Principal repaid this period.
    pub principal_payment: f64,
    /// `coupon + principal_payment`.
    pub total_payment: f64,
    /// Principal still owed after this period's payment.
    pub outstanding_balance: f64,
}

/// Ordered cash flows, one entry per period from 1 to maturity.
///
/// The period index drives discounting and time weighting, so entries are
/// never reordered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CashFlowSchedule {
    entries: Vec<CashFlowEntry>,
}

impl CashFlowSchedule {
    /// Creates a schedule from entries already in period order.
    #[must_use]
    pub fn new(entries: Vec<CashFlowEntry>) -> Self {
        debug_assert!(entries
            .iter()
            .enumerate()
            .all(|(i, e)| e.period as usize == i + 1));
        Self { entries }
    }

    /// The entries in period order.
    #[must_use]
    pub fn entries(&self) -> &[CashFlowEntry] {
        &self.entries
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, CashFlowEntry> {
        self.entries.iter()
    }

    /// The `total_payment` column in period order.
    #[must_use]
    pub fn amounts(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.total_payment).collect()
    }

    /// Sum of all payments.
    #[must_use]
    pub fn total_payments(&self) -> f64 {
        self.entries.iter().map(|e| e.total_payment).sum()
    }

    /// Sum of all coupons.
    #[must_use]
    pub fn total_coupons(&self) -> f64 {
        self.entries.iter().map(|e| e.coupon).sum()
    }

    /// Sum of all principal repayments.
    #[must_use]
    pub fn total_principal(&self) -> f64 {
        self.entries.iter().map(|e| e.principal_payment).sum()
    }

    /// Consumes the schedule, returning the entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<CashFlowEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlowEntry;
    type IntoIter = std::slice::Iter<'a, CashFlowEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(period: u32, coupon: f64, principal: f64, balance: f64) -> CashFlowEntry {
        CashFlowEntry {
            period,
            coupon,
            principal_payment: principal,
            total_payment: coupon + principal,
            outstanding_balance: balance,
        }
    }

    #[test]
    fn test_totals() {
        let schedule = CashFlowSchedule::new(vec![
            entry(1, 50.0, 0.0, 1000.0),
            entry(2, 50.0, 1000.0, 0.0),
        ]);
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.total_coupons(), 100.0);
        assert_eq!(schedule.total_principal(), 1000.0);
        assert_eq!(schedule.total_payments(), 1100.0);
        assert_eq!(schedule.amounts(), vec![50.0, 1050.0]);
    }

    #[test]
    fn test_serializes_as_array() {
        let schedule = CashFlowSchedule::new(vec![entry(1, 10.0, 100.0, 0.0)]);
        let json = serde_json::to_value(&schedule).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["principal_payment"], 100.0);
    }
}
