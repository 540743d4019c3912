//! Ordering Bounded Context
//!
//! Manages an order from checkout to completion.
//!
//! # Key Concepts
//!
//! - **Order Aggregate**: Snapshot of the cart plus status lifecycle
//! - **Pricing Engine**: One pure pricing module for server and cart
//! - **State Machine**: Permissive between open statuses, terminal states final
//! - **Domain Events**: Placement, status and estimate changes

pub mod aggregate;
pub mod errors;
pub mod events;
pub mod repository;
pub mod services;
pub mod value_objects;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::{LineItem, Order, PlaceOrderCommand};
pub use errors::OrderError;
pub use events::{EstimatedTimeChanged, OrderEvent, OrderPlaced, OrderStatusChanged};
pub use repository::{OrderPatch, OrderStore, StoreError};
pub use services::{
    OrderNumberGenerator, OrderStateMachine, PriceBreakdown, Priced, PricingEngine, TAX_RATE,
};
pub use value_objects::{
    Customer, EstimatePolicy, OrderNumber, OrderStatus, OrderType, StatusFilter,
};
