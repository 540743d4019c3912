//! Order lifecycle errors.

use std::fmt;

use super::repository::StoreError;
use super::value_objects::OrderStatus;

/// Errors that can occur while placing or progressing an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Bad or missing input on an order payload.
    Validation {
        /// Offending field (camelCase, as the client sends it).
        field: String,
        /// Human-readable message.
        message: String,
    },

    /// Status value is not one of the seven known statuses.
    InvalidStatus {
        /// The value that failed to parse.
        value: String,
    },

    /// The state machine rejected a transition.
    IllegalTransition {
        /// Current order status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
        /// Reason for failure.
        reason: String,
    },

    /// The order has reached a terminal status and can no longer be edited.
    OrderClosed {
        /// Current (terminal) status.
        status: OrderStatus,
    },

    /// Order not found.
    NotFound {
        /// Order ID.
        order_id: String,
    },

    /// Duplicate order ID on create.
    DuplicateOrderId {
        /// Order ID.
        order_id: String,
    },

    /// Persistence layer failure.
    Store(StoreError),
}

impl OrderError {
    /// Shorthand for a validation failure.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a missing order.
    pub fn not_found(order_id: impl fmt::Display) -> Self {
        Self::NotFound {
            order_id: order_id.to_string(),
        }
    }
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message, .. } => write!(f, "{message}"),
            Self::InvalidStatus { value } => write!(f, "Invalid status: {value}"),
            Self::IllegalTransition { from, to, reason } => {
                write!(f, "Cannot move order from {from} to {to}: {reason}")
            }
            Self::OrderClosed { status } => {
                write!(f, "Order is {status} and can no longer be changed")
            }
            Self::NotFound { order_id } => write!(f, "Order not found: {order_id}"),
            Self::DuplicateOrderId { order_id } => write!(f, "Duplicate order ID: {order_id}"),
            Self::Store(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_is_the_message() {
        let err = OrderError::validation("items", "empty cart");
        assert_eq!(err.to_string(), "empty cart");
    }

    #[test]
    fn illegal_transition_display_names_both_states() {
        let err = OrderError::IllegalTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Cancelled,
            reason: "order already delivered".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("delivered"));
        assert!(msg.contains("cancelled"));
    }

    #[test]
    fn store_error_converts() {
        let err: OrderError = StoreError::Unavailable {
            message: "down".to_string(),
        }
        .into();
        assert!(matches!(err, OrderError::Store(_)));
    }
}
