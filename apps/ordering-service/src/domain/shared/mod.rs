//! Shared Domain Types
//!
//! Value objects shared across the ordering and identity contexts.

pub mod value_objects;

pub use value_objects::{AdminId, DishId, Money, OrderId, Timestamp};
