//! Order store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Upper bound for any single store call.
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: default_store_timeout_ms(),
        }
    }
}

impl PersistenceConfig {
    /// Store call timeout.
    #[must_use]
    pub const fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

const fn default_store_timeout_ms() -> u64 {
    2_000
}
