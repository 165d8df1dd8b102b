//! Hunt Server
//!
//! Binds the listener, runs the tick loop next to the HTTP router and
//! shuts both down in order: stop accepting, let in-flight long polls get
//! their last flush, then stop ticking.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::{info, instrument};

use crate::game::config::HuntConfig;
use crate::network::admin::AdminPolicy;
use crate::network::http::router;
use crate::network::service::HuntService;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
    /// Server version string.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ServerConfig {
    /// Create config from environment variables.
    ///
    /// `HUNT_BIND_ADDR` wins over `PORT`; either falls back to `0.0.0.0:8080`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let bind_addr = std::env::var("HUNT_BIND_ADDR")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .or_else(|| {
                std::env::var("PORT")
                    .ok()
                    .and_then(|raw| raw.parse::<u16>().ok())
                    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
            })
            .unwrap_or(defaults.bind_addr);

        Self { bind_addr, ..defaults }
    }
}

/// Server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("failed to bind {addr}: {source}")]
    BindFailed {
        /// Address we tried.
        addr: SocketAddr,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// HTTP server stopped with an error.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// The diamond hunt server.
pub struct HuntServer {
    config: ServerConfig,
    hunt: HuntConfig,
    service: Arc<HuntService>,
    shutdown_tx: broadcast::Sender<()>,
}

impl HuntServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, hunt: HuntConfig, admin: AdminPolicy) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let service = Arc::new(HuntService::new(&hunt, admin));

        Self { config, hunt, service, shutdown_tx }
    }

    /// Shared service behind the server.
    pub fn service(&self) -> Arc<HuntService> {
        Arc::clone(&self.service)
    }

    /// Sender that stops the server when signalled.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Run the server until shutdown.
    #[instrument(skip(self), fields(addr = %self.config.bind_addr))]
    pub async fn run(&self) -> Result<(), ServerError> {
        let addr = self.config.bind_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::BindFailed { addr, source })?;
        info!("Diamond hunt v{} listening on {}", self.config.version, addr);

        let (tick_stop_tx, tick_stop_rx) = broadcast::channel(1);
        let tick_handle = self.service.spawn_tick_loop(self.hunt.tick_period, tick_stop_rx);
        info!("Creating diamonds every {:?}", self.hunt.tick_period);

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let result = axum::serve(listener, router(self.service()))
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("Shutdown signal received");
            })
            .await;

        let _ = tick_stop_tx.send(());
        let _ = tick_handle.await;

        result?;
        Ok(())
    }
}
