//! Order State Machine Service
//!
//! Validates status transitions. Movement between non-terminal statuses is
//! permissive (the kitchen can skip stages, e.g. dine-in never goes out for
//! delivery); `delivered` and `cancelled` are final.

use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::value_objects::OrderStatus;

/// Order State Machine for validating transitions.
pub struct OrderStateMachine;

impl OrderStateMachine {
    /// Parse a requested status from its wire value.
    pub fn parse_status(raw: &str) -> Result<OrderStatus, OrderError> {
        raw.parse()
    }

    /// Check if a state transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: OrderStatus, to: OrderStatus) -> bool {
        Self::valid_next_states(from).contains(&to)
    }

    /// Validate a state transition.
    pub fn validate_transition(from: OrderStatus, to: OrderStatus) -> Result<(), OrderError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(OrderError::IllegalTransition {
                from,
                to,
                reason: Self::transition_error_reason(from, to),
            })
        }
    }

    /// Get a human-readable reason for an invalid transition.
    #[must_use]
    pub fn transition_error_reason(from: OrderStatus, to: OrderStatus) -> String {
        match from {
            OrderStatus::Delivered => format!("order already delivered, cannot become {to}"),
            OrderStatus::Cancelled => format!("order was cancelled, cannot become {to}"),
            _ => format!("transition from {from} to {to} is not allowed"),
        }
    }

    /// All statuses reachable from `from`.
    ///
    /// Re-applying the current status is accepted for non-terminal orders and
    /// only refreshes `updatedAt`.
    #[must_use]
    pub fn valid_next_states(from: OrderStatus) -> &'static [OrderStatus] {
        use OrderStatus::{
            Cancelled, Confirmed, Delivered, OutForDelivery, Pending, Preparing, Ready,
        };

        match from {
            Pending | Confirmed | Preparing | Ready | OutForDelivery => &[
                Pending,
                Confirmed,
                Preparing,
                Ready,
                OutForDelivery,
                Delivered,
                Cancelled,
            ],
            // Terminal states
            Delivered | Cancelled => &[],
        }
    }

    /// Next stage for one-tap progression in the admin console.
    ///
    /// Follows `pending → confirmed → preparing → ready → delivered`.
    /// `out-for-delivery` is never suggested but advances to `delivered`.
    #[must_use]
    pub const fn canonical_next(from: OrderStatus) -> Option<OrderStatus> {
        match from {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready | OrderStatus::OutForDelivery => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(OrderStatus::Pending, OrderStatus::Confirmed)]
    #[test_case(OrderStatus::Pending, OrderStatus::Ready ; "skip ahead")]
    #[test_case(OrderStatus::Ready, OrderStatus::Preparing ; "step back")]
    #[test_case(OrderStatus::Ready, OrderStatus::OutForDelivery)]
    #[test_case(OrderStatus::OutForDelivery, OrderStatus::Delivered)]
    #[test_case(OrderStatus::Preparing, OrderStatus::Cancelled)]
    #[test_case(OrderStatus::Confirmed, OrderStatus::Confirmed ; "same status")]
    fn non_terminal_transitions_are_permitted(from: OrderStatus, to: OrderStatus) {
        assert!(OrderStateMachine::validate_transition(from, to).is_ok());
    }

    #[test]
    fn terminal_states_reject_everything() {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            for to in OrderStatus::ALL {
                let err = OrderStateMachine::validate_transition(from, to).unwrap_err();
                assert!(matches!(err, OrderError::IllegalTransition { .. }));
            }
        }
    }

    #[test]
    fn cancelled_cannot_be_cancelled_again() {
        assert!(!OrderStateMachine::is_valid_transition(
            OrderStatus::Cancelled,
            OrderStatus::Cancelled
        ));
    }

    #[test]
    fn canonical_chain_walks_to_delivered() {
        let mut status = OrderStatus::Pending;
        let mut walked = vec![status];
        while let Some(next) = OrderStateMachine::canonical_next(status) {
            walked.push(next);
            status = next;
        }
        assert_eq!(walked, OrderStatus::TIMELINE.to_vec());
    }

    #[test]
    fn canonical_next_skips_out_for_delivery() {
        assert_eq!(
            OrderStateMachine::canonical_next(OrderStatus::Ready),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(
            OrderStateMachine::canonical_next(OrderStatus::OutForDelivery),
            Some(OrderStatus::Delivered)
        );
        assert_eq!(OrderStateMachine::canonical_next(OrderStatus::Cancelled), None);
    }

    #[test]
    fn parse_status_rejects_unknown_values() {
        let err = OrderStateMachine::parse_status("on-the-way").unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidStatus {
                value: "on-the-way".to_string()
            }
        );
    }

    #[test]
    fn error_reason_mentions_terminal_state() {
        let reason =
            OrderStateMachine::transition_error_reason(OrderStatus::Delivered, OrderStatus::Ready);
        assert!(reason.contains("delivered"));
    }
}
