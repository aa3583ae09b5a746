//! # Hash Server - Entry Point
//! src/main.rs

use hash_server::config::Config;
use hash_server::server::Server;
use hash_server::shutdown::install_shutdown_handler;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = Config::new();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if let Err(e) = config.validate() {
        error!(error = %e, "invalid configuration");
        std::process::exit(1);
    }

    info!(
        address = %config.address(),
        hash_delay_ms = config.hash_delay_ms,
        max_request_bytes = config.max_request_bytes,
        "starting hash server"
    );

    let server = Server::new(config);
    if let Err(e) = server.run(install_shutdown_handler()).await {
        error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
