//! Order Domain Events
//!
//! Records of lifecycle changes, drained from the aggregate after each
//! successful write and handed to the event publisher.

use serde::{Deserialize, Serialize};

use crate::domain::ordering::value_objects::{OrderNumber, OrderStatus, OrderType};
use crate::domain::shared::{Money, OrderId, Timestamp};

/// All order domain events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OrderEvent {
    /// A customer placed an order.
    Placed(OrderPlaced),
    /// The restaurant moved an order to a new status.
    StatusChanged(OrderStatusChanged),
    /// The restaurant changed the quoted preparation time.
    EstimatedTimeChanged(EstimatedTimeChanged),
}

impl OrderEvent {
    /// The order this event belongs to.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        match self {
            Self::Placed(e) => &e.order_id,
            Self::StatusChanged(e) => &e.order_id,
            Self::EstimatedTimeChanged(e) => &e.order_id,
        }
    }

    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Placed(_) => "OrderPlaced",
            Self::StatusChanged(_) => "OrderStatusChanged",
            Self::EstimatedTimeChanged(_) => "EstimatedTimeChanged",
        }
    }
}

/// Order placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    /// Order ID.
    pub order_id: OrderId,
    /// Display number.
    pub order_number: OrderNumber,
    /// Fulfilment type.
    pub order_type: OrderType,
    /// Authoritative total.
    pub total: Money,
    /// When it happened.
    pub occurred_at: Timestamp,
}

/// Status transition applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    /// Order ID.
    pub order_id: OrderId,
    /// Previous status.
    pub from: OrderStatus,
    /// New status.
    pub to: OrderStatus,
    /// When it happened.
    pub occurred_at: Timestamp,
}

/// Preparation estimate overridden by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatedTimeChanged {
    /// Order ID.
    pub order_id: OrderId,
    /// New estimate in minutes.
    pub minutes: u32,
    /// When it happened.
    pub occurred_at: Timestamp,
}
