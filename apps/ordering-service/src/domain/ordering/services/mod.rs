//! Ordering Domain Services
//!
//! Stateless logic shared by the order aggregate and the client cart.

mod order_number_generator;
mod order_state_machine;
mod pricing;

pub use order_number_generator::OrderNumberGenerator;
pub use order_state_machine::OrderStateMachine;
pub use pricing::{PriceBreakdown, Priced, PricingEngine, TAX_RATE};
