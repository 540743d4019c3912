//! Order Aggregate Root
//!
//! Owns the order document from placement to completion. Totals are always
//! derived from the line items here; status and time fields only move through
//! [`Order::transition_to`] and [`Order::override_estimated_time`].

use super::LineItem;
use crate::domain::ordering::errors::OrderError;
use crate::domain::ordering::events::{
    EstimatedTimeChanged, OrderEvent, OrderPlaced, OrderStatusChanged,
};
use crate::domain::ordering::repository::OrderPatch;
use crate::domain::ordering::services::{OrderStateMachine, PriceBreakdown, PricingEngine};
use crate::domain::ordering::value_objects::{
    Customer, MIN_PHONE_LEN, OrderNumber, OrderStatus, OrderType, non_blank,
};
use crate::domain::shared::{Money, OrderId, Timestamp};

/// Upper bound for an admin-quoted preparation time (one day).
pub const MAX_ESTIMATE_MINUTES: u32 = 24 * 60;

/// Largest unit price accepted on a line item.
pub const MAX_UNIT_PRICE: Money = Money::new(1_000_000);

/// Largest quantity accepted on a line item.
pub const MAX_LINE_QUANTITY: u32 = 1_000;

/// Command to place a new order.
#[derive(Debug, Clone)]
pub struct PlaceOrderCommand {
    /// Cart snapshot.
    pub items: Vec<LineItem>,
    /// Contact details.
    pub customer: Customer,
    /// Fulfilment type.
    pub order_type: OrderType,
    /// Table for dine-in orders.
    pub table_number: Option<String>,
    /// Order-level note.
    pub instructions: Option<String>,
}

impl PlaceOrderCommand {
    /// Validate the command parameters.
    ///
    /// Checks run in the order a customer fixes them at checkout: cart,
    /// name, phone, then the fields the order type requires.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::validation("items", "empty cart"));
        }

        for item in &self.items {
            if item.dish_id.as_str().trim().is_empty() {
                return Err(OrderError::validation("items", "Every item needs a dishId"));
            }
            if item.quantity == 0 {
                return Err(OrderError::validation(
                    "items",
                    format!("Quantity for '{}' must be at least 1", item.name),
                ));
            }
            if item.quantity > MAX_LINE_QUANTITY {
                return Err(OrderError::validation(
                    "items",
                    format!(
                        "Quantity for '{}' must be at most {MAX_LINE_QUANTITY}",
                        item.name
                    ),
                ));
            }
            if item.price.is_negative() {
                return Err(OrderError::validation(
                    "items",
                    format!("Price for '{}' must not be negative", item.name),
                ));
            }
            if item.price > MAX_UNIT_PRICE {
                return Err(OrderError::validation(
                    "items",
                    format!(
                        "Price for '{}' must be at most {}",
                        item.name,
                        MAX_UNIT_PRICE.units()
                    ),
                ));
            }
        }

        if self.customer.name.trim().is_empty() {
            return Err(OrderError::validation("customer.name", "Name is required"));
        }

        let phone = self.customer.phone.trim();
        if phone.is_empty() {
            return Err(OrderError::validation("customer.phone", "Phone is required"));
        }
        if phone.chars().count() < MIN_PHONE_LEN {
            return Err(OrderError::validation(
                "customer.phone",
                format!("Phone must be at least {MIN_PHONE_LEN} characters"),
            ));
        }

        if self.order_type.requires_address()
            && non_blank(self.customer.address.as_deref()).is_none()
        {
            return Err(OrderError::validation(
                "customer.address",
                "Delivery address is required",
            ));
        }

        if self.order_type.requires_table_number()
            && non_blank(self.table_number.as_deref()).is_none()
        {
            return Err(OrderError::validation(
                "tableNumber",
                "Table number is required for dine-in",
            ));
        }

        Ok(())
    }
}

/// Order Aggregate Root.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    order_number: OrderNumber,
    status: OrderStatus,
    order_type: OrderType,
    customer: Customer,
    table_number: Option<String>,
    items: Vec<LineItem>,
    pricing: PriceBreakdown,
    instructions: Option<String>,
    estimated_time: u32,
    events: Vec<OrderEvent>,
    created_at: Timestamp,
    updated_at: Timestamp,
    confirmed_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
}

impl Order {
    /// Place a new order from a command.
    ///
    /// Totals are computed here from the items; any client-side totals are
    /// not consulted. Generates an `OrderPlaced` event.
    pub fn place(
        cmd: PlaceOrderCommand,
        order_number: OrderNumber,
        estimated_time: u32,
        now: Timestamp,
    ) -> Result<Self, OrderError> {
        cmd.validate()?;

        let id = OrderId::generate();
        let pricing = PricingEngine::try_price(&cmd.items)
            .ok_or_else(|| OrderError::validation("items", "Order total is out of range"))?;
        let table_number = if cmd.order_type.requires_table_number() {
            non_blank(cmd.table_number.as_deref())
        } else {
            None
        };
        let items = cmd
            .items
            .into_iter()
            .map(|item| LineItem {
                instructions: non_blank(item.instructions.as_deref()),
                image: non_blank(item.image.as_deref()),
                ..item
            })
            .collect();

        let mut order = Self {
            id: id.clone(),
            order_number: order_number.clone(),
            status: OrderStatus::Pending,
            order_type: cmd.order_type,
            customer: cmd.customer,
            table_number,
            items,
            pricing,
            instructions: non_blank(cmd.instructions.as_deref()),
            estimated_time,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
            confirmed_at: None,
            completed_at: None,
        };

        order.events.push(OrderEvent::Placed(OrderPlaced {
            order_id: id,
            order_number,
            order_type: cmd.order_type,
            total: pricing.total,
            occurred_at: now,
        }));

        Ok(order)
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Get the order ID.
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Get the display number.
    #[must_use]
    pub const fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    /// Get the current status.
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Get the fulfilment type.
    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Get the customer.
    #[must_use]
    pub const fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Get the table number (dine-in only).
    #[must_use]
    pub fn table_number(&self) -> Option<&str> {
        self.table_number.as_deref()
    }

    /// Get the line items.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get the computed totals.
    #[must_use]
    pub const fn pricing(&self) -> PriceBreakdown {
        self.pricing
    }

    /// Get the subtotal.
    #[must_use]
    pub const fn subtotal(&self) -> Money {
        self.pricing.subtotal
    }

    /// Get the tax.
    #[must_use]
    pub const fn tax(&self) -> Money {
        self.pricing.tax
    }

    /// Get the total.
    #[must_use]
    pub const fn total(&self) -> Money {
        self.pricing.total
    }

    /// Get the order-level note.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// Get the preparation estimate in minutes.
    #[must_use]
    pub const fn estimated_time(&self) -> u32 {
        self.estimated_time
    }

    /// Get the placement timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Get the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Get the first confirmation timestamp.
    #[must_use]
    pub const fn confirmed_at(&self) -> Option<Timestamp> {
        self.confirmed_at
    }

    /// Get the completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Move the order to `to`.
    ///
    /// Returns the patch to persist. Stamps `confirmedAt` on first
    /// confirmation, `completedAt` on delivery or cancellation, and always
    /// refreshes `updatedAt`.
    pub fn transition_to(
        &mut self,
        to: OrderStatus,
        now: Timestamp,
    ) -> Result<OrderPatch, OrderError> {
        let from = self.status;
        OrderStateMachine::validate_transition(from, to)?;

        let patch = OrderPatch {
            status: Some(to),
            updated_at: Some(now),
            confirmed_at: (to == OrderStatus::Confirmed && self.confirmed_at.is_none())
                .then_some(now),
            completed_at: to.is_terminal().then_some(now),
            ..OrderPatch::default()
        };
        self.apply_patch(&patch);

        if from != to {
            self.events
                .push(OrderEvent::StatusChanged(OrderStatusChanged {
                    order_id: self.id.clone(),
                    from,
                    to,
                    occurred_at: now,
                }));
        }

        Ok(patch)
    }

    /// Override the quoted preparation time.
    pub fn override_estimated_time(
        &mut self,
        minutes: u32,
        now: Timestamp,
    ) -> Result<OrderPatch, OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::OrderClosed {
                status: self.status,
            });
        }
        if minutes == 0 || minutes > MAX_ESTIMATE_MINUTES {
            return Err(OrderError::validation(
                "estimatedTime",
                format!("Estimated time must be between 1 and {MAX_ESTIMATE_MINUTES} minutes"),
            ));
        }

        let changed = minutes != self.estimated_time;
        let patch = OrderPatch {
            estimated_time: Some(minutes),
            updated_at: Some(now),
            ..OrderPatch::default()
        };
        self.apply_patch(&patch);

        if changed {
            self.events
                .push(OrderEvent::EstimatedTimeChanged(EstimatedTimeChanged {
                    order_id: self.id.clone(),
                    minutes,
                    occurred_at: now,
                }));
        }

        Ok(patch)
    }

    /// Merge persisted fields into this order.
    ///
    /// Used by stores to implement partial updates; performs no validation.
    pub fn apply_patch(&mut self, patch: &OrderPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(minutes) = patch.estimated_time {
            self.estimated_time = minutes;
        }
        if let Some(at) = patch.confirmed_at {
            self.confirmed_at = Some(at);
        }
        if let Some(at) = patch.completed_at {
            self.completed_at = Some(at);
        }
        if let Some(at) = patch.updated_at {
            self.updated_at = at;
        }
    }

    /// Drain pending domain events.
    pub fn drain_events(&mut self) -> Vec<OrderEvent> {
        std::mem::take(&mut self.events)
    }
}
