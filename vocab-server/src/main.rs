use std::time::Duration;
use tokio::signal;
use tracing::info;

use vocab_persistence::DatabaseManager;
use vocab_server::{config::Config, create_routes, state::AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Vocab Quest server...");

    let config = Config::new();

    // Initialize database connection and run migrations
    let database = match DatabaseManager::connect(&config.database_url).await {
        Ok(database) => database,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::load(&config, database.stores()).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to restore stored state: {:#}", e);
            std::process::exit(1);
        }
    };

    // Start cleanup task
    let cleanup_connections = state.connections.clone();
    let cleanup_library = state.library.clone();
    let connection_timeout = Duration::from_secs(config.connection_timeout_seconds);
    let quiz_timeout = Duration::from_secs(config.quiz_timeout_seconds);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            interval.tick().await;
            cleanup_connections.cleanup_inactive_connections(connection_timeout);
            cleanup_library.cleanup_stale_quizzes(quiz_timeout);
        }
    });

    let routes = create_routes(state);

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) =
        warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), shutdown_signal());

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let (mut sigint, mut sigterm) = match (
            signal::unix::signal(signal::unix::SignalKind::interrupt()),
            signal::unix::signal(signal::unix::SignalKind::terminate()),
        ) {
            (Ok(sigint), Ok(sigterm)) => (sigint, sigterm),
            _ => {
                tracing::error!("Failed to install signal handlers");
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to listen for ctrl+c");
            return std::future::pending().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}
