//! Server startup and graceful shutdown.

use std::sync::Arc;

use movie_vault_db::{SqliteRepository, StoreOptions};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::ServerError;
use crate::routes::{self, AppState};

/// Open the database, ensuring its schema. Any failure here is fatal.
pub fn open_repository(config: &Config) -> Result<SqliteRepository, ServerError> {
    let repo = SqliteRepository::open(&config.db_path, StoreOptions::default())?;
    log::info!("Connected to database (env: {})", config.env);
    Ok(repo)
}

/// Serve the HTTP API until Ctrl-C or SIGTERM.
pub async fn serve(config: &Config, repo: SqliteRepository) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new(Arc::new(repo), &config.http));
    let app = routes::router(state);

    let addr = config.http.addr();
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Server listening on: {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::warn!("Failed to listen for SIGTERM: {e}");
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
    log::info!("Server shutting down...");
}
