//! Crypto Ticker - A caching proxy for a cryptocurrency ticker API
//!
//! Serves `/api/symbols` and `/api/ticker/:symbol` from an in-memory cache
//! backed by the upstream ticker service, plus a static dashboard.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crypto_ticker::api::create_app;
use crypto_ticker::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the ticker proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the upstream client and cache store
/// 4. Start background purge task
/// 5. Create Axum router with API and dashboard
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crypto_ticker=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Crypto Ticker proxy");

    let config = Config::from_env();
    info!(
        "Configuration loaded: upstream={}, cache_ttl={}s, port={}, cleanup_interval={}s",
        config.api_url, config.cache_ttl, config.server_port, config.cleanup_interval
    );
    if config.api_key.is_empty() {
        warn!("API_KEY is not set, upstream requests will be unauthenticated");
    }

    let state = AppState::from_config(&config).context("Failed to build upstream client")?;
    info!("Cache store initialized");

    let cleanup_handle =
        spawn_cleanup_task(state.cache.clone(), state.clock.clone(), config.cleanup_interval);

    let app = create_app(state, &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server is running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the purge task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cache purge task aborted");
}
