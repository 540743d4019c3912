//! Configuration module for the ordering service.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before anything is wired.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ordering_service::config::load_config;
//!
//! // Load from default path (config.yaml)
//! let config = load_config(None)?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod auth;
mod observability;
mod ordering;
mod persistence;
mod polling;
mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{
    AuthConfig, BCRYPT_COST_RANGE, BootstrapAdminConfig, MIN_SECRET_BYTES,
    PLACEHOLDER_SECRET_MARKER,
};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use ordering::OrderingConfig;
pub use persistence::PersistenceConfig;
pub use polling::PollingConfig;
pub use server::ServerConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ORDERING_CONFIG";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),

    /// Environment override could not be parsed.
    #[error("Invalid value for environment variable {name}: {value}")]
    InvalidEnvVar {
        /// Variable name.
        name: String,
        /// Offending value.
        value: String,
    },
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Admin authentication.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Order placement.
    #[serde(default)]
    pub ordering: OrderingConfig,
    /// Order store.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Client polling intervals.
    #[serde(default)]
    pub polling: PollingConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// `HTTP_PORT` and `JWT_SECRET` override the file when set.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    let interpolated = interpolate_env_vars(&contents);
    let mut config: Config = serde_yaml_bw::from_str(&interpolated)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Apply `HTTP_PORT` and `JWT_SECRET` from `lookup`.
fn apply_env_overrides(
    config: &mut Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    if let Some(port) = lookup("HTTP_PORT").filter(|v| !v.is_empty()) {
        config.server.http_port = port.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: "HTTP_PORT".to_string(),
            value: port.clone(),
        })?;
    }

    if let Some(secret) = lookup("JWT_SECRET").filter(|v| !v.is_empty()) {
        config.auth.jwt_secret = secret;
    }

    Ok(())
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.http_port == 0 {
        return Err(ConfigError::ValidationError(
            "server.http_port must be non-zero".to_string(),
        ));
    }

    if config.auth.jwt_secret.len() < MIN_SECRET_BYTES {
        return Err(ConfigError::ValidationError(format!(
            "auth.jwt_secret must be at least {MIN_SECRET_BYTES} bytes; set JWT_SECRET"
        )));
    }

    if config.auth.uses_placeholder_secret() {
        return Err(ConfigError::ValidationError(
            "auth.jwt_secret is a placeholder; set JWT_SECRET to a private random value"
                .to_string(),
        ));
    }

    if !BCRYPT_COST_RANGE.contains(&config.auth.bcrypt_cost) {
        return Err(ConfigError::ValidationError(format!(
            "auth.bcrypt_cost must be within {}..={}",
            BCRYPT_COST_RANGE.start(),
            BCRYPT_COST_RANGE.end()
        )));
    }

    if config.auth.token_ttl_hours == 0 {
        return Err(ConfigError::ValidationError(
            "auth.token_ttl_hours must be positive".to_string(),
        ));
    }

    let admin = &config.auth.bootstrap_admin;
    if admin.enabled && (admin.email.trim().is_empty() || admin.password.is_empty()) {
        return Err(ConfigError::ValidationError(
            "auth.bootstrap_admin needs an email and password".to_string(),
        ));
    }

    let ordering = &config.ordering;
    if ordering.delivery_minutes == 0
        || ordering.takeaway_minutes == 0
        || ordering.dine_in_minutes == 0
    {
        return Err(ConfigError::ValidationError(
            "ordering estimate minutes must be positive".to_string(),
        ));
    }

    if config.persistence.store_timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "persistence.store_timeout_ms must be positive".to_string(),
        ));
    }

    if config.polling.tracking_interval_secs == 0 || config.polling.admin_interval_secs == 0 {
        return Err(ConfigError::ValidationError(
            "polling intervals must be positive".to_string(),
        ));
    }

    let valid_formats = ["json", "pretty"];
    let format = config.observability.logging.format.to_ascii_lowercase();
    if !valid_formats.contains(&format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}
