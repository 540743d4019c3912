//! Ordering Aggregates

mod line_item;
mod order;

pub use line_item::LineItem;
pub use order::{MAX_ESTIMATE_MINUTES, MAX_LINE_QUANTITY, MAX_UNIT_PRICE, Order, PlaceOrderCommand};
