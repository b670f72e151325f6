//! # Camp Roster API
//!
//! HTTP server entry point.
//!
//! ```text
//! load config ──► open SQLite pool (+ migrations) ──► serve ──► Ctrl+C / SIGTERM ──► close pool
//! ```

use camp_api::{router, ApiConfig, AppState};
use camp_db::{migrations, Database};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,camp_api=debug")),
        )
        .with_target(true)
        .init();

    info!("Starting Camp Roster API server...");

    let config = ApiConfig::load()?;
    info!(
        host = %config.host,
        port = config.port,
        db_url = %config.database_url,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config()).await?;
    let (total, applied) = migrations::migration_status(db.pool()).await?;
    if !db.health_check().await {
        warn!("Database health check failed; requests may error");
    }
    info!(migrations_total = total, migrations_applied = applied, "Database ready");

    let app = router(AppState::new(db.clone()));

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
