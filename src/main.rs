//! Diamond Hunt Server
//!
//! Reads configuration from the environment and serves the hunt until
//! Ctrl-C.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use diamond_hunt::{AdminPolicy, HuntConfig, HuntServer, ServerConfig, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let hunt = HuntConfig::from_env();
    hunt.validate().context("invalid hunt configuration")?;
    let admin = AdminPolicy::from_env();
    let server_config = ServerConfig::from_env();

    info!("Diamond Hunt Server v{}", VERSION);
    info!("Canvas: {}x{}, colors: {}", hunt.canvas_width, hunt.canvas_height, hunt.palette.len());
    info!("Cheating prevention: {}", if hunt.cheating_prevention { "on" } else { "off" });
    if admin == AdminPolicy::DenyAll {
        warn!("HUNT_ADMIN_REFERER not set; admin routes are disabled");
    }

    let server = HuntServer::new(server_config, hunt, admin);

    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = shutdown.send(());
            }
            Err(e) => warn!("Cannot listen for Ctrl-C: {}", e),
        }
    });

    server.run().await.context("server failed")?;
    info!("Server stopped");
    Ok(())
}
