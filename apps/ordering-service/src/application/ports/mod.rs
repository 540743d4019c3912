//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! - **Driver Ports** (Primary/Inbound): How the world uses our application
//! - **Driven Ports** (Secondary/Outbound): How our application uses external systems

mod event_publisher_port;
mod password_hasher_port;
mod token_port;

#[cfg(test)]
pub use event_publisher_port::MockEventPublisherPort;
pub use event_publisher_port::{EventPublishError, EventPublisherPort, NoOpEventPublisher};
pub use password_hasher_port::{PasswordHashError, PasswordHasherPort};
pub use token_port::{TokenClaims, TokenError, TokenPort};
