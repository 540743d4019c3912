// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Ordering Service - Rust Core Library
//!
//! Order lifecycle core for the Red Dragon restaurant storefront.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic (aggregates, value objects, domain events)
//!   - `ordering`: Order aggregate, status state machine, pricing engine
//!   - `identity`: Admin accounts and authenticated principals
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`TokenPort`, `EventPublisherPort`)
//!   - `use_cases`: `PlaceOrder`, `TrackOrder`, `ManageOrders`
//!   - `services`: Admin auth gate, idempotency cache
//!   - `dto`: Data transfer objects for API boundaries
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `http`: Axum REST API
//!   - `persistence`: In-memory order and admin stores with store timeouts
//!   - `auth`: JWT tokens and bcrypt password hashes
//!   - `events`: Order events to the structured log
//!   - `config`: Dependency injection container
//!
//! - **Client**: Storefront side
//!   - `cart`, `checkout`, `tracking`, `admin_feed`, `api_client`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Client layer - Cart, checkout and polling view models.
pub mod client;

// =============================================================================
// Ambient Modules
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports from Clean Architecture
// =============================================================================

// Domain re-exports
pub use domain::identity::{AuthError, Principal, Role};
pub use domain::ordering::{
    Order, OrderError, OrderStatus, OrderStore, OrderType, PriceBreakdown, PricingEngine,
    StatusFilter, StoreError,
};
pub use domain::shared::{DishId, Money, OrderId, Timestamp};

// Application re-exports
pub use application::dto::{OrderDto, PlaceOrderDto, PlacedOrderDto, UpdateOrderDto};
pub use application::services::AdminAuthGate;
pub use application::use_cases::{ManageOrdersUseCase, PlaceOrderUseCase, TrackOrderUseCase};

// Infrastructure re-exports
pub use infrastructure::config::{Container, DefaultContainer};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::persistence::{InMemoryOrderStore, TimeoutOrderStore};

// Client re-exports
pub use client::{Cart, StorefrontClient, TrackingState, TrackingViewModel};
