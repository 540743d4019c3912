//! How an order reaches the customer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::ordering::errors::OrderError;

/// Fulfilment type, fixed at placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    /// Rider delivers to `customer.address`.
    Delivery,
    /// Customer collects at the counter.
    Takeaway,
    /// Served at `tableNumber`.
    DineIn,
}

impl OrderType {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Takeaway => "takeaway",
            Self::DineIn => "dine-in",
        }
    }

    /// Delivery orders must carry an address.
    #[must_use]
    pub const fn requires_address(&self) -> bool {
        matches!(self, Self::Delivery)
    }

    /// Dine-in orders must carry a table number.
    #[must_use]
    pub const fn requires_table_number(&self) -> bool {
        matches!(self, Self::DineIn)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(Self::Delivery),
            "takeaway" => Ok(Self::Takeaway),
            "dine-in" => Ok(Self::DineIn),
            other => Err(OrderError::validation(
                "type",
                format!("Unknown order type '{other}'"),
            )),
        }
    }
}

/// Default preparation estimates per order type, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatePolicy {
    /// Minutes quoted for delivery orders.
    pub delivery_minutes: u32,
    /// Minutes quoted for takeaway orders.
    pub takeaway_minutes: u32,
    /// Minutes quoted for dine-in orders.
    pub dine_in_minutes: u32,
}

impl EstimatePolicy {
    /// Quoted minutes for an order type.
    #[must_use]
    pub const fn minutes_for(&self, order_type: OrderType) -> u32 {
        match order_type {
            OrderType::Delivery => self.delivery_minutes,
            OrderType::Takeaway => self.takeaway_minutes,
            OrderType::DineIn => self.dine_in_minutes,
        }
    }
}

impl Default for EstimatePolicy {
    fn default() -> Self {
        Self {
            delivery_minutes: 45,
            takeaway_minutes: 45,
            dine_in_minutes: 20,
        }
    }
}
