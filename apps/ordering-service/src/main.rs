//! Ordering Service Binary
//!
//! Starts the Red Dragon ordering API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin ordering-service
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERING_CONFIG`: Path to the YAML config (default: config.yaml)
//! - `HTTP_PORT`: HTTP server port (default: 3000)
//! - `JWT_SECRET`: Admin token signing secret, at least 32 bytes
//! - `ADMIN_EMAIL` / `ADMIN_PASSWORD`: Bootstrap admin credentials
//! - `LOG_FORMAT`: json | pretty (default: json)
//! - `RUST_LOG`: Log filter (default: info)

use std::time::Duration;

use anyhow::Context;
use ordering_service::config::{CONFIG_PATH_ENV, Config, load_config};
use ordering_service::infrastructure::config::DefaultContainer;
use ordering_service::infrastructure::http::create_router;
use ordering_service::telemetry::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = std::env::var(CONFIG_PATH_ENV).ok();
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;
    init_tracing(&config.observability.logging).context("failed to initialise tracing")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Ordering Service");
    log_config(&config);

    let container = DefaultContainer::from_config(&config);
    if let Some(admin) = container
        .seed_bootstrap_admin(&config.auth.bootstrap_admin)
        .await
        .context("failed to seed bootstrap admin")?
    {
        tracing::info!(email = %admin.email(), "Bootstrap admin seeded");
    }

    let shutdown_token = CancellationToken::new();
    let mut http_handle = start_http_server(&config, &container, shutdown_token.clone()).await?;

    tracing::info!("Ordering service ready");

    let stopped_early = tokio::select! {
        () = shutdown_signal() => false,
        result = &mut http_handle => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server task failed");
            }
            true
        }
    };

    shutdown_token.cancel();

    if !stopped_early {
        tracing::info!(
            timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
            "Graceful shutdown started"
        );
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, http_handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(error = %e, "HTTP server task failed"),
            Err(_) => tracing::warn!("Graceful shutdown timed out; exiting"),
        }
    }

    tracing::info!("Ordering service stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_hours = config.auth.token_ttl_hours,
        store_timeout_ms = config.persistence.store_timeout_ms,
        idempotency_window_secs = config.ordering.idempotency_window_secs,
        bootstrap_admin = config.auth.bootstrap_admin.enabled,
        "Configuration loaded"
    );
}

/// Start the HTTP server with graceful shutdown support.
async fn start_http_server(
    config: &Config,
    container: &DefaultContainer,
    shutdown: CancellationToken,
) -> anyhow::Result<JoinHandle<()>> {
    let app = create_router(container.app_state(env!("CARGO_PKG_VERSION")));

    let http_addr = config.server.socket_address();
    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    tracing::info!(%http_addr, "HTTP server starting");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  POST /orders");
    tracing::info!("  GET  /orders/{{id}}");
    tracing::info!("  POST /admin/login");
    tracing::info!("  GET  /admin/verify");
    tracing::info!("  GET  /admin/orders");
    tracing::info!("  GET  /admin/orders/stats");
    tracing::info!("  GET  /admin/orders/{{id}}");
    tracing::info!("  PUT  /admin/orders/{{id}}");
    tracing::info!("  POST /admin/orders/{{id}}/advance");

    let http_server = axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await });

    Ok(tokio::spawn(async move {
        if let Err(e) = http_server.await {
            tracing::error!("HTTP server error: {e}");
        }
    }))
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
///
/// A signal handler that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
