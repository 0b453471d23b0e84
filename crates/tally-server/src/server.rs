use std::sync::Arc;

use tokio::net::TcpListener;

use tally_ledger::InMemoryLedger;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::SharedLedger;
use crate::router::build_router;

/// Tally HTTP server. Owns the ledger for the lifetime of the process.
pub struct TallyServer {
    config: ServerConfig,
    ledger: SharedLedger,
}

impl TallyServer {
    /// Create a server around a fresh, empty ledger.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_ledger(config, Arc::new(InMemoryLedger::new()))
    }

    pub fn with_ledger(config: ServerConfig, ledger: SharedLedger) -> Self {
        Self { config, ledger }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::clone(&self.ledger), &self.config)
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Tally server listening on {local_addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        tracing::info!("Tally server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
