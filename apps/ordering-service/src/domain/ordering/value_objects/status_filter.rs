//! Admin list filter over order statuses.

use std::fmt;
use std::str::FromStr;

use super::OrderStatus;
use crate::domain::ordering::errors::OrderError;

/// Which orders the admin list should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every order.
    #[default]
    All,
    /// Every non-terminal order.
    Active,
    /// Orders in exactly this status.
    Status(OrderStatus),
}

impl StatusFilter {
    /// Returns true if an order in `status` passes the filter.
    #[must_use]
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status.is_active(),
            Self::Status(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Active => f.write_str("active"),
            Self::Status(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            other => other.parse().map(Self::Status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("all", StatusFilter::All)]
    #[test_case("", StatusFilter::All)]
    #[test_case("active", StatusFilter::Active)]
    #[test_case("ready", StatusFilter::Status(OrderStatus::Ready))]
    fn parses_filters(raw: &str, expected: StatusFilter) {
        assert_eq!(raw.parse::<StatusFilter>().unwrap(), expected);
    }

    #[test]
    fn unknown_filter_is_invalid_status() {
        let err = "archived".parse::<StatusFilter>().unwrap_err();
        assert!(matches!(err, OrderError::InvalidStatus { .. }));
    }

    #[test]
    fn active_excludes_terminal_statuses() {
        let filter = StatusFilter::Active;
        assert!(filter.matches(OrderStatus::Pending));
        assert!(filter.matches(OrderStatus::OutForDelivery));
        assert!(!filter.matches(OrderStatus::Delivered));
        assert!(!filter.matches(OrderStatus::Cancelled));
    }

    #[test]
    fn exact_status_matches_only_itself() {
        let filter = StatusFilter::Status(OrderStatus::Ready);
        assert!(filter.matches(OrderStatus::Ready));
        assert!(!filter.matches(OrderStatus::Preparing));
    }
}
