use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use portfolio_contact::api;
use portfolio_contact::config::Config;
use portfolio_contact::mail::Mailer;
use portfolio_contact::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before logging, so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("Starting portfolio contact relay...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        host = %config.server_host,
        port = %config.server_port,
        smtp_host = %config.smtp.host,
        smtp_port = %config.smtp.port,
        "Configuration loaded"
    );

    let missing = config.smtp.missing_keys();
    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "Mail relay is not fully configured");
    }

    let mailer = Mailer::smtp(&config.smtp)?;
    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(config, mailer);

    // Build router
    let app = Router::new()
        .merge(api::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Server listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM; in-flight sends finish before the server exits.
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
            tracing::info!("Received Ctrl+C, draining in-flight requests");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, draining in-flight requests");
        },
    }
}
