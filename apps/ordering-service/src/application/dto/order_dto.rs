//! Order DTOs
//!
//! JSON shapes shared by the HTTP API and the storefront client. Field names
//! are camelCase on the wire.

use serde::{Deserialize, Serialize};

use crate::domain::ordering::{
    Customer, LineItem, Order, OrderError, OrderStatus, OrderType, PlaceOrderCommand,
    PriceBreakdown,
};
use crate::domain::shared::{DishId, Money, Timestamp};

/// One line of an order, as sent at checkout and returned on reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDto {
    /// Dish ID.
    pub dish_id: String,
    /// Dish name.
    pub name: String,
    /// Unit price.
    pub price: Money,
    /// Units ordered.
    pub quantity: u32,
    /// Dish image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Per-dish note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl LineItemDto {
    fn from_line(line: &LineItem) -> Self {
        Self {
            dish_id: line.dish_id.to_string(),
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
            image: line.image.clone(),
            instructions: line.instructions.clone(),
        }
    }

    fn into_line(self) -> LineItem {
        LineItem {
            dish_id: DishId::new(self.dish_id),
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            image: self.image,
            instructions: self.instructions,
        }
    }
}

/// Customer contact block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Phone.
    #[serde(default)]
    pub phone: String,
    /// Delivery address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Checkout submission.
///
/// `subtotal`, `tax` and `total` are what the client displayed. They are
/// compared against the server's own figures for logging and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderDto {
    /// Cart lines.
    #[serde(default)]
    pub items: Vec<LineItemDto>,
    /// Contact details.
    #[serde(default)]
    pub customer: CustomerDto,
    /// `delivery`, `takeaway` or `dine-in`.
    #[serde(rename = "type", default)]
    pub order_type: String,
    /// Table for dine-in orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    /// Order-level note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Client-computed subtotal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Money>,
    /// Client-computed tax.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<Money>,
    /// Client-computed total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Money>,
}

impl PlaceOrderDto {
    /// Client-side totals, if the client sent all three.
    #[must_use]
    pub fn client_totals(&self) -> Option<PriceBreakdown> {
        Some(PriceBreakdown {
            subtotal: self.subtotal?,
            tax: self.tax?,
            total: self.total?,
        })
    }

    /// Convert to a domain command.
    ///
    /// Only the order type is checked here; everything else is validated by
    /// the command itself.
    pub fn into_command(self) -> Result<PlaceOrderCommand, OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::validation("items", "empty cart"));
        }
        let order_type: OrderType = self.order_type.trim().parse()?;

        Ok(PlaceOrderCommand {
            items: self
                .items
                .into_iter()
                .map(LineItemDto::into_line)
                .collect(),
            customer: Customer::new(
                &self.customer.name,
                &self.customer.phone,
                self.customer.address.as_deref(),
            ),
            order_type,
            table_number: self.table_number,
            instructions: self.instructions,
        })
    }
}

/// Result of a successful placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrderDto {
    /// Public order id for tracking.
    pub order_id: String,
    /// Display number.
    pub order_number: String,
    /// Always `pending` on placement.
    pub status: OrderStatus,
    /// Quoted minutes.
    pub estimated_time: u32,
}

impl PlacedOrderDto {
    /// Build from a freshly placed order.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        Self {
            order_id: order.id().to_string(),
            order_number: order.order_number().to_string(),
            status: order.status(),
            estimated_time: order.estimated_time(),
        }
    }
}

/// Full order document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    /// Order ID.
    pub id: String,
    /// Display number.
    pub order_number: String,
    /// Current status.
    pub status: OrderStatus,
    /// Fulfilment type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Contact details.
    pub customer: CustomerDto,
    /// Table for dine-in orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    /// Line snapshot.
    pub items: Vec<LineItemDto>,
    /// Subtotal.
    pub subtotal: Money,
    /// Tax.
    pub tax: Money,
    /// Total.
    pub total: Money,
    /// Order-level note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Quoted minutes.
    pub estimated_time: u32,
    /// Placement time.
    pub created_at: Timestamp,
    /// Last change.
    pub updated_at: Timestamp,
    /// First confirmation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<Timestamp>,
    /// Delivery or cancellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl OrderDto {
    /// Build from the aggregate.
    #[must_use]
    pub fn from_order(order: &Order) -> Self {
        let customer = order.customer();
        Self {
            id: order.id().to_string(),
            order_number: order.order_number().to_string(),
            status: order.status(),
            order_type: order.order_type(),
            customer: CustomerDto {
                name: customer.name.clone(),
                phone: customer.phone.clone(),
                address: customer.address.clone(),
            },
            table_number: order.table_number().map(str::to_string),
            items: order.items().iter().map(LineItemDto::from_line).collect(),
            subtotal: order.subtotal(),
            tax: order.tax(),
            total: order.total(),
            instructions: order.instructions().map(str::to_string),
            estimated_time: order.estimated_time(),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
            confirmed_at: order.confirmed_at(),
            completed_at: order.completed_at(),
        }
    }
}

/// Admin edit: status and/or estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderDto {
    /// Requested status (wire value).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New estimate in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatsDto {
    /// Orders waiting for confirmation.
    pub pending_orders: usize,
    /// Orders confirmed but not completed.
    pub active_orders: usize,
    /// Σ total of today's (UTC) non-cancelled orders.
    pub today_revenue: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout_json() -> serde_json::Value {
        serde_json::json!({
            "items": [
                {"dishId": "d1", "name": "Kung Pao Chicken", "price": 180, "quantity": 2, "category": "mains"},
                {"dishId": "d2", "name": "Spring Rolls", "price": 120, "quantity": 1}
            ],
            "customer": {"name": "Mei", "phone": "9876543210", "address": "12 Lotus Rd"},
            "type": "delivery",
            "subtotal": 480,
            "tax": 24,
            "total": 504
        })
    }

    #[test]
    fn checkout_payload_deserializes_and_ignores_unknown_fields() {
        let dto: PlaceOrderDto = serde_json::from_value(checkout_json()).unwrap();
        assert_eq!(dto.items.len(), 2);
        assert_eq!(dto.order_type, "delivery");
        assert_eq!(
            dto.client_totals().map(|t| t.total),
            Some(Money::new(504))
        );
    }

    #[test]
    fn into_command_parses_type() {
        let dto: PlaceOrderDto = serde_json::from_value(checkout_json()).unwrap();
        let cmd = dto.into_command().unwrap();
        assert_eq!(cmd.order_type, OrderType::Delivery);
        assert_eq!(cmd.items[0].dish_id, DishId::new("d1"));
    }

    #[test]
    fn into_command_rejects_unknown_type() {
        let mut dto: PlaceOrderDto = serde_json::from_value(checkout_json()).unwrap();
        dto.order_type = "drone".to_string();
        assert!(matches!(
            dto.into_command(),
            Err(OrderError::Validation { ref field, .. }) if field == "type"
        ));
    }

    #[test]
    fn empty_items_reported_before_type() {
        let dto = PlaceOrderDto::default();
        assert_eq!(
            dto.into_command().unwrap_err(),
            OrderError::validation("items", "empty cart")
        );
    }

    #[test]
    fn partial_client_totals_are_ignored() {
        let dto = PlaceOrderDto {
            subtotal: Some(Money::new(480)),
            ..PlaceOrderDto::default()
        };
        assert!(dto.client_totals().is_none());
    }

    #[test]
    fn update_dto_accepts_camel_case() {
        let dto: UpdateOrderDto =
            serde_json::from_str(r#"{"status":"ready","estimatedTime":10}"#).unwrap();
        assert_eq!(dto.status.as_deref(), Some("ready"));
        assert_eq!(dto.estimated_time, Some(10));
    }
}
