//! AutoDoc - OpenAPI documentation exporter
//!
//! This is the main entry point for the AutoDoc server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use autodoc::{routes, AppState, Config};
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autodoc=info,tower_http=info".into()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting AutoDoc");

    // Load configuration
    let config = Config::from_env()?;
    if config.cdn_url.is_empty() {
        warn!("CDN_URL is not set, artifact links will be relative");
    }
    info!(
        renderer = %config.renderer,
        data_dir = %config.data_dir.display(),
        "Configuration loaded successfully"
    );

    // Initialize application state
    let state = Arc::new(AppState::new(config.clone())?);
    info!("Application state initialized");

    // Build the router
    let app = routes::create_router(state);

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {}", addr);
    info!("Swagger UI: http://{}/swagger", addr);

    // Create listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("AutoDoc shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating shutdown");
        }
    }
}
