//! Admin authentication configuration.

use serde::{Deserialize, Serialize};

/// Minimum HS256 secret length in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Marker found in sample secrets that must never sign real tokens.
pub const PLACEHOLDER_SECRET_MARKER: &str = "change-me";

/// bcrypt work factor bounds.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Auth configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret.
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime in hours.
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u32,
    /// bcrypt work factor for admin passwords.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Account seeded at startup.
    #[serde(default)]
    pub bootstrap_admin: BootstrapAdminConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            bcrypt_cost: default_bcrypt_cost(),
            bootstrap_admin: BootstrapAdminConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Token lifetime.
    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.token_ttl_hours))
    }

    /// Returns true if the signing secret is a copied sample value.
    #[must_use]
    pub fn uses_placeholder_secret(&self) -> bool {
        self.jwt_secret
            .to_ascii_lowercase()
            .contains(PLACEHOLDER_SECRET_MARKER)
    }
}

/// Admin account created on startup so the console is usable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    /// Seed the account.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Login email.
    #[serde(default = "default_admin_email")]
    pub email: String,
    /// Initial password.
    #[serde(default = "default_admin_password")]
    pub password: String,
}

impl Default for BootstrapAdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            email: default_admin_email(),
            password: default_admin_password(),
        }
    }
}

impl BootstrapAdminConfig {
    /// Returns true if the well-known default password is still configured.
    #[must_use]
    pub fn uses_default_password(&self) -> bool {
        self.password == default_admin_password()
    }
}

const fn default_token_ttl_hours() -> u32 {
    24
}

const fn default_bcrypt_cost() -> u32 {
    crate::infrastructure::auth::DEFAULT_BCRYPT_COST
}

const fn default_true() -> bool {
    true
}

fn default_admin_email() -> String {
    "admin@reddragon.com".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}
