//! Configuration Module
//!
//! Dependency injection for the ordering service.

mod container;

pub use container::{Container, ContainerSettings, DefaultContainer};
