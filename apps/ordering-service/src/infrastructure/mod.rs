//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `persistence/`: In-memory order and admin stores, store timeouts
//!   - `auth/`: JWT signing and bcrypt password hashing
//!   - `events/`: Order event publishing to the structured log
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: REST API controllers
//!
//! - **Wiring**
//!   - `config/`: Dependency injection container

pub mod auth;
pub mod config;
pub mod events;
pub mod http;
pub mod persistence;
