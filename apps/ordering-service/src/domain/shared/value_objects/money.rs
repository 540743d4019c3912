//! Money value object for menu prices and order totals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// An amount in whole currency units (rupees).
///
/// Menu prices are whole numbers, so all order arithmetic stays integral.
/// Serializes as a bare JSON number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a Money value from whole currency units.
    #[must_use]
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Get the amount in whole currency units.
    #[must_use]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns true if this amount is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiply by a line quantity. Saturates instead of wrapping.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as i64))
    }

    /// Multiply by a line quantity, or `None` on overflow.
    #[must_use]
    pub const fn checked_times(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as i64) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }

    /// Add two amounts, or `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(units) => Some(Self(units)),
            None => None,
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<i64> for Money {
    fn from(units: i64) -> Self {
        Self(units)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_multiplies_by_quantity() {
        assert_eq!(Money::new(180).times(2), Money::new(360));
        assert_eq!(Money::new(180).times(0), Money::ZERO);
    }

    #[test]
    fn sum_adds_all_amounts() {
        let total: Money = [Money::new(360), Money::new(120)].into_iter().sum();
        assert_eq!(total, Money::new(480));
    }

    #[test]
    fn addition_saturates() {
        assert_eq!(Money::new(i64::MAX) + Money::new(1), Money::new(i64::MAX));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        assert_eq!(Money::new(180).checked_times(2), Some(Money::new(360)));
        assert_eq!(Money::new(i64::MAX / 2).checked_times(3), None);
        assert_eq!(Money::new(i64::MAX).checked_add(Money::new(1)), None);
        assert_eq!(
            Money::new(480).checked_add(Money::new(24)),
            Some(Money::new(504))
        );
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&Money::new(504)).unwrap(), "504");
        let parsed: Money = serde_json::from_str("24").unwrap();
        assert_eq!(parsed, Money::new(24));
    }

    #[test]
    fn display_includes_symbol() {
        assert_eq!(Money::new(480).to_string(), "₹480");
    }
}
