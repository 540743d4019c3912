//! Client Layer
//!
//! The storefront side of the order lifecycle:
//!
//! - `cart`: Local cart priced by the shared pricing engine
//! - `cart_store`: Cart persistence (file or memory)
//! - `checkout`: Local validation and order submission
//! - `api_client`: Storefront HTTP client
//! - `tracking`: Polling view model for one order
//! - `admin_feed`: Polling admin order list

pub mod admin_feed;
pub mod api_client;
pub mod cart;
pub mod cart_store;
pub mod checkout;
pub mod tracking;

pub use admin_feed::{AdminFeedState, AdminOrderFeed, AdminOrderSource, DEFAULT_ADMIN_INTERVAL};
pub use api_client::{ApiClientError, StorefrontClient};
pub use cart::{Cart, CartLine, Dish};
pub use cart_store::{
    CartStorageError, CartStore, DEFAULT_CART_FILE, FileCartStore, MemoryCartStore,
};
pub use checkout::{CheckoutDetails, CheckoutError};
pub use tracking::{
    DEFAULT_TRACKING_INTERVAL, FetchError, MIN_POLL_INTERVAL, OrderSource, TrackingSnapshot,
    TrackingState, TrackingViewModel,
};
