//! Pricing Engine
//!
//! Turns line items into subtotal, tax and total. Shared by the server
//! (authoritative totals) and the client cart (display totals) so the two
//! can never drift.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// GST applied to every order.
pub const TAX_RATE: Decimal = dec!(0.05);

/// Anything that contributes `unit_price × quantity` to a subtotal.
pub trait Priced {
    /// Price of one unit.
    fn unit_price(&self) -> Money;
    /// Number of units.
    fn quantity(&self) -> u32;
}

/// Computed totals for a set of line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Σ price × quantity.
    pub subtotal: Money,
    /// `round(subtotal × TAX_RATE)`, half-up.
    pub tax: Money,
    /// `subtotal + tax`. No delivery fee is added.
    pub total: Money,
}

/// Pure pricing functions.
pub struct PricingEngine;

impl PricingEngine {
    /// Price a sequence of line items. An empty sequence prices to zero.
    #[must_use]
    pub fn price<'a, P, I>(lines: I) -> PriceBreakdown
    where
        P: Priced + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let subtotal: Money = lines
            .into_iter()
            .map(|line| line.unit_price().times(line.quantity()))
            .sum();
        let tax = Self::tax_for(subtotal);

        PriceBreakdown {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// Like [`Self::price`], but `None` when any step would overflow.
    ///
    /// Used for authoritative server totals, where a clamped figure would
    /// break `total = subtotal + tax`.
    #[must_use]
    pub fn try_price<'a, P, I>(lines: I) -> Option<PriceBreakdown>
    where
        P: Priced + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        let subtotal = lines.into_iter().try_fold(Money::ZERO, |acc, line| {
            acc.checked_add(line.unit_price().checked_times(line.quantity())?)
        })?;
        let tax = Self::tax_for(subtotal);

        Some(PriceBreakdown {
            subtotal,
            tax,
            total: subtotal.checked_add(tax)?,
        })
    }

    /// Tax on a subtotal, rounded to the nearest whole unit with halves
    /// rounded away from zero.
    #[must_use]
    pub fn tax_for(subtotal: Money) -> Money {
        let raw = Decimal::from(subtotal.units()) * TAX_RATE;
        let rounded = raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        // |subtotal × 0.05| is always inside i64 range.
        Money::new(rounded.to_i64().unwrap_or_default())
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count<'a, P, I>(lines: I) -> u32
    where
        P: Priced + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        lines
            .into_iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity()))
    }
}
