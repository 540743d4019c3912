//! Shared order builders for unit tests.

use super::{Customer, LineItem, Order, OrderType, PlaceOrderCommand};
use crate::domain::ordering::value_objects::OrderNumber;
use crate::domain::shared::{DishId, Money, Timestamp};

pub fn line(dish: &str, price: i64, quantity: u32) -> LineItem {
    LineItem {
        dish_id: DishId::new(dish),
        name: format!("Dish {dish}"),
        price: Money::new(price),
        quantity,
        image: None,
        instructions: None,
    }
}

pub fn command(order_type: OrderType) -> PlaceOrderCommand {
    PlaceOrderCommand {
        items: vec![line("d1", 180, 2), line("d2", 120, 1)],
        customer: Customer::new("Mei Lin", "9876543210", Some("12 Lotus Road")),
        order_type,
        table_number: Some("7".to_string()),
        instructions: None,
    }
}

pub fn t0() -> Timestamp {
    Timestamp::parse("2026-01-19T12:00:00Z").unwrap()
}

/// A pending delivery order worth 480 + 24 = 504, placed at `at`.
pub fn order_at(at: Timestamp) -> Order {
    let mut order = Order::place(
        command(OrderType::Delivery),
        OrderNumber::from_digits(123_456),
        45,
        at,
    )
    .unwrap();
    order.drain_events();
    order
}

pub fn order() -> Order {
    order_at(t0())
}
