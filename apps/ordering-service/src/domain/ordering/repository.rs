//! Order Store trait (Repository pattern)
//!
//! Pure persistence over the `orders` document collection. The only check
//! behind this trait is the status precondition carried by [`OrderPatch`].

use async_trait::async_trait;

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::{OrderStatus, StatusFilter};
use crate::domain::shared::{OrderId, Timestamp};

/// Persistence layer failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Backing store could not be reached.
    #[error("Order store unavailable: {message}")]
    Unavailable { message: String },

    /// Operation exceeded its time budget.
    #[error("Order store {operation} timed out after {timeout_ms}ms")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },
}

/// Fields merged into a stored order by [`OrderStore::update_partial`].
///
/// `None` leaves the stored value untouched. When `expected_status` is set
/// the store applies the patch only if the stored status still equals it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPatch {
    /// Status the patch was validated against.
    pub expected_status: Option<OrderStatus>,
    /// New status.
    pub status: Option<OrderStatus>,
    /// New preparation estimate in minutes.
    pub estimated_time: Option<u32>,
    /// Stamp set on first confirmation.
    pub confirmed_at: Option<Timestamp>,
    /// Stamp set on delivery or cancellation.
    pub completed_at: Option<Timestamp>,
    /// Last modification time.
    pub updated_at: Option<Timestamp>,
}

impl OrderPatch {
    /// Require the stored status to still be `status` when the patch lands.
    #[must_use]
    pub fn expecting(mut self, status: OrderStatus) -> Self {
        self.expected_status = Some(status);
        self
    }

    /// Check the precondition against the status currently stored.
    ///
    /// A mismatch means another update landed in between; a closed order
    /// reports `OrderClosed`, anything else an illegal transition.
    pub fn check_expected(&self, current: OrderStatus) -> Result<(), OrderError> {
        match self.expected_status {
            Some(expected) if expected != current => {
                if current.is_terminal() {
                    Err(OrderError::OrderClosed { status: current })
                } else {
                    Err(OrderError::IllegalTransition {
                        from: current,
                        to: self.status.unwrap_or(current),
                        reason: format!("order moved from {expected} to {current} concurrently"),
                    })
                }
            }
            _ => Ok(()),
        }
    }

    /// Returns true if the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.estimated_time.is_none()
            && self.confirmed_at.is_none()
            && self.completed_at.is_none()
            && self.updated_at.is_none()
    }

    /// Combine two patches; fields set in `other` win.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            expected_status: other.expected_status.or(self.expected_status),
            status: other.status.or(self.status),
            estimated_time: other.estimated_time.or(self.estimated_time),
            confirmed_at: other.confirmed_at.or(self.confirmed_at),
            completed_at: other.completed_at.or(self.completed_at),
            updated_at: other.updated_at.or(self.updated_at),
        }
    }
}

/// Order Store.
///
/// Implementations must be thread-safe and bound every call in time,
/// surfacing failures as [`OrderError::Store`].
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order. Fails with `DuplicateOrderId` if the id exists.
    async fn create(&self, order: &Order) -> Result<(), OrderError>;

    /// Fetch an order by id. Fails with `NotFound`.
    async fn get_by_id(&self, id: &OrderId) -> Result<Order, OrderError>;

    /// Orders passing `filter`, newest first.
    async fn list_by_status(&self, filter: StatusFilter) -> Result<Vec<Order>, OrderError>;

    /// Merge `patch` into the stored order and return the result.
    ///
    /// The status precondition and the write happen atomically. Fails with
    /// `NotFound`, or with the error from [`OrderPatch::check_expected`].
    async fn update_partial(&self, id: &OrderId, patch: OrderPatch) -> Result<Order, OrderError>;
}
