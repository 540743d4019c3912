//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod manage_orders;
mod place_order;
mod track_order;

pub use manage_orders::ManageOrdersUseCase;
pub use place_order::PlaceOrderUseCase;
pub use track_order::TrackOrderUseCase;
