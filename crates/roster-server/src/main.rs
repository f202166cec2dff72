//! # Roster Server
//!
//! Main entry point for the Roster user management API.

use roster_config::{AppConfig, ConfigLoader};
use roster_core::{RosterError, RosterResult};
use roster_rest::create_router;
use roster_server::{
    di::AppContainer,
    logging::init_logging,
    startup::{print_banner, print_startup_info},
};
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location().load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();

    info!("Starting Roster Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> RosterResult<()> {
    let container = AppContainer::build(&config).await?;
    let router = create_router(container.app_state(), &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RosterError::Internal(format!("Failed to bind {addr}: {e}")))?;

    print_startup_info(&config);
    info!("Starting REST server on http://{}", addr);

    let shutdown_timeout = config.server.shutdown_timeout();
    let server = axum::serve(listener, router).with_graceful_shutdown(shutdown_signal());

    let result = server
        .await
        .map_err(|e| RosterError::Internal(format!("REST server error: {e}")));

    drain(container, shutdown_timeout).await;
    result?;

    info!("Server shutdown complete");
    Ok(())
}

/// Closes the database pool, giving up after `timeout`.
async fn drain(container: AppContainer, timeout: Duration) {
    let pool = container.database_pool();
    if tokio::time::timeout(timeout, pool.close()).await.is_err() {
        warn!("Database pool did not close within {:?}", timeout);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
