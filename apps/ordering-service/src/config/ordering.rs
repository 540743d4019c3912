//! Order placement configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::ordering::EstimatePolicy;

/// Ordering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Quoted minutes for delivery orders.
    #[serde(default = "default_delivery_minutes")]
    pub delivery_minutes: u32,
    /// Quoted minutes for takeaway orders.
    #[serde(default = "default_takeaway_minutes")]
    pub takeaway_minutes: u32,
    /// Quoted minutes for dine-in orders.
    #[serde(default = "default_dine_in_minutes")]
    pub dine_in_minutes: u32,
    /// How long an `Idempotency-Key` is remembered.
    #[serde(default = "default_idempotency_window_secs")]
    pub idempotency_window_secs: u64,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            delivery_minutes: default_delivery_minutes(),
            takeaway_minutes: default_takeaway_minutes(),
            dine_in_minutes: default_dine_in_minutes(),
            idempotency_window_secs: default_idempotency_window_secs(),
        }
    }
}

impl OrderingConfig {
    /// Estimate policy for new orders.
    #[must_use]
    pub const fn estimates(&self) -> EstimatePolicy {
        EstimatePolicy {
            delivery_minutes: self.delivery_minutes,
            takeaway_minutes: self.takeaway_minutes,
            dine_in_minutes: self.dine_in_minutes,
        }
    }

    /// Idempotency window.
    #[must_use]
    pub const fn idempotency_window(&self) -> Duration {
        Duration::from_secs(self.idempotency_window_secs)
    }
}

const fn default_delivery_minutes() -> u32 {
    45
}

const fn default_takeaway_minutes() -> u32 {
    45
}

const fn default_dine_in_minutes() -> u32 {
    20
}

const fn default_idempotency_window_secs() -> u64 {
    600
}
