//! Ordering Value Objects

mod customer;
mod order_number;
mod order_status;
mod order_type;
mod status_filter;

pub use customer::{Customer, MIN_PHONE_LEN};
pub(crate) use customer::non_blank;
pub use order_number::OrderNumber;
pub use order_status::OrderStatus;
pub use order_type::{EstimatePolicy, OrderType};
pub use status_filter::StatusFilter;
