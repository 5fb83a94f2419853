//! # AzChat User Store
//!
//! Loads configuration, initializes logging, then creates the users schema
//! and verifies the database is reachable. Exits with status 1 on failure.

use azchat_config::ConfigLoader;
use azchat_core::telemetry::init_tracing;
use azchat_server::{bootstrap, print_banner, print_startup_info};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.get().await,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(&config.logging) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    print_banner();
    print_startup_info(&config);

    if let Err(e) = bootstrap(&config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }

    info!("Bootstrap complete");
}
