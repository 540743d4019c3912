//! Application Layer
//!
//! The application layer orchestrates domain logic through use cases.
//! It defines:
//!
//! - **Ports**: Interfaces for token signing, password hashing and events
//! - **Use Cases**: Placement, tracking and the admin console
//! - **Services**: The admin auth gate and the idempotency cache
//! - **DTOs**: JSON shapes shared by the API and the storefront client

pub mod dto;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use dto::*;
pub use ports::*;
pub use services::*;
pub use use_cases::*;
