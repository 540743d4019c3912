//! Order status in the lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::ordering::errors::OrderError;

/// Order status as shown to customers and the kitchen.
///
/// ```text
/// pending → confirmed → preparing → ready → delivered
///                                      └→ out-for-delivery → delivered
/// cancelled is reachable from every non-terminal status
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Placed, waiting for the restaurant to accept.
    Pending,
    /// Accepted by the restaurant.
    Confirmed,
    /// In the kitchen.
    Preparing,
    /// Ready for pickup, serving or dispatch.
    Ready,
    /// Handed to a rider.
    OutForDelivery,
    /// Completed.
    Delivered,
    /// Cancelled by the restaurant.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// The five stages rendered on the customer tracking timeline.
    pub const TIMELINE: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::Delivered,
    ];

    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if no further transition is accepted.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Returns true for orders still moving through the restaurant.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true once accepted but not yet completed.
    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(
            self,
            Self::Confirmed | Self::Preparing | Self::Ready | Self::OutForDelivery
        )
    }

    /// Index on the tracking timeline.
    ///
    /// `out-for-delivery` sits between `ready` and `delivered`, so it reports
    /// the `ready` stage as reached. `cancelled` has no position.
    #[must_use]
    pub const fn timeline_position(&self) -> Option<usize> {
        match self {
            Self::Pending => Some(0),
            Self::Confirmed => Some(1),
            Self::Preparing => Some(2),
            Self::Ready | Self::OutForDelivery => Some(3),
            Self::Delivered => Some(4),
            Self::Cancelled => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| OrderError::InvalidStatus {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("pending", OrderStatus::Pending)]
    #[test_case("confirmed", OrderStatus::Confirmed)]
    #[test_case("preparing", OrderStatus::Preparing)]
    #[test_case("ready", OrderStatus::Ready)]
    #[test_case("out-for-delivery", OrderStatus::OutForDelivery)]
    #[test_case("delivered", OrderStatus::Delivered)]
    #[test_case("cancelled", OrderStatus::Cancelled)]
    fn parses_wire_values(raw: &str, expected: OrderStatus) {
        assert_eq!(raw.parse::<OrderStatus>().unwrap(), expected);
        assert_eq!(expected.to_string(), raw);
    }

    #[test_case("shipped")]
    #[test_case("Pending")]
    #[test_case("")]
    fn rejects_unknown_values(raw: &str) {
        let err = raw.parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, OrderError::InvalidStatus { .. }));
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"out-for-delivery\"");
    }

    #[test]
    fn only_delivered_and_cancelled_are_terminal() {
        let terminal: Vec<_> = OrderStatus::ALL
            .into_iter()
            .filter(OrderStatus::is_terminal)
            .collect();
        assert_eq!(terminal, vec![OrderStatus::Delivered, OrderStatus::Cancelled]);
    }

    #[test]
    fn timeline_positions_follow_the_canonical_chain() {
        for (index, status) in OrderStatus::TIMELINE.into_iter().enumerate() {
            assert_eq!(status.timeline_position(), Some(index));
        }
        assert_eq!(OrderStatus::OutForDelivery.timeline_position(), Some(3));
        assert_eq!(OrderStatus::Cancelled.timeline_position(), None);
    }

    #[test]
    fn pending_is_active_but_not_in_progress() {
        assert!(OrderStatus::Pending.is_active());
        assert!(!OrderStatus::Pending.is_in_progress());
        assert!(OrderStatus::OutForDelivery.is_in_progress());
    }
}
