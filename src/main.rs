use anyhow::{Context, Result};
use axum::serve;
use portal::core::config::Config;
use portal::core::state::AppState;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    // Load configuration (the file is optional, env vars override it)
    let config = Config::load(&config_path).context(format!(
        "Failed to load configuration from '{}'",
        config_path.display()
    ))?;

    // Initialize tracing/logging
    portal::core::tracing_init::init_tracing(&config.logging);

    // Build Tokio runtime with configured number of threads
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        port = config.server.port,
        num_threads = config.server.num_threads,
        users_file = %config.data.users_file.display(),
        session_ttl_secs = config.session.ttl_secs,
        log_level = %config.logging.level,
        "Login portal starting"
    );

    // Create application state; a missing user data file is fatal here
    let port = config.server.port;
    let state = AppState::new(config).context(
        "Failed to load the user data file. The service cannot start without it.",
    )?;

    info!(users = state.user_store.len(), "User store loaded");

    // Build the router with middleware
    let app = portal::core::routes::build_router(Arc::new(state)).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        ),
    );

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind TCP listener to {}", addr))?;

    info!(address = %addr, "Listening for HTTP connections");

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shutting down gracefully");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
