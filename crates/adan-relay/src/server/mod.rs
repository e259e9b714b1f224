//! HTTP server for the relay

pub mod routes;
pub mod state;

use axum::Router;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Build the full application router over `state`
pub fn create_router(state: AppState) -> Router {
    // CORS layer - must be added last (outermost)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload_size = state.config().server.max_upload_size;

    Router::new()
        .nest("/api", routes::api_routes(max_upload_size))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Relay HTTP server
pub struct RelayServer {
    config: RelayConfig,
    state: AppState,
}

impl RelayServer {
    /// Create a new relay server
    pub fn new(config: RelayConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Shared state (for startup checks)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Start the server; returns after Ctrl+C once in-flight requests finish
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::configuration(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::configuration(format!("Failed to bind {}: {}", addr, e)))?;

        tracing::info!("Starting relay server on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        tracing::info!("Relay server stopped");
        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
