//! Client polling intervals.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::client::admin_feed::DEFAULT_ADMIN_INTERVAL;
use crate::client::tracking::DEFAULT_TRACKING_INTERVAL;

/// Polling configuration for the tracking view and admin feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Seconds between tracking refreshes.
    #[serde(default = "default_tracking_interval_secs")]
    pub tracking_interval_secs: u64,
    /// Seconds between admin list refreshes.
    #[serde(default = "default_admin_interval_secs")]
    pub admin_interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            tracking_interval_secs: default_tracking_interval_secs(),
            admin_interval_secs: default_admin_interval_secs(),
        }
    }
}

impl PollingConfig {
    /// Tracking refresh interval.
    #[must_use]
    pub const fn tracking_interval(&self) -> Duration {
        Duration::from_secs(self.tracking_interval_secs)
    }

    /// Admin list refresh interval.
    #[must_use]
    pub const fn admin_interval(&self) -> Duration {
        Duration::from_secs(self.admin_interval_secs)
    }
}

const fn default_tracking_interval_secs() -> u64 {
    DEFAULT_TRACKING_INTERVAL.as_secs()
}

const fn default_admin_interval_secs() -> u64 {
    DEFAULT_ADMIN_INTERVAL.as_secs()
}
