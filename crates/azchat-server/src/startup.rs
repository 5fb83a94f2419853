//! Server startup utilities.

use azchat_config::AppConfig;
use azchat_core::{AzchatResult, HasComponent};
use azchat_repository::{build_user_store_module, DatabasePoolInterface, UserRepository};
use std::sync::Arc;
use tracing::{error, info};

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ___        ________          __
   /   |____  / ____/ /_  ____ _/ /_
  / /| /_  / / /   / __ \/ __ `/ __/
 / ___ |/ /_/ /___/ / / / /_/ / /_
/_/  |_/___/\____/_/ /_/\__,_/\__/

                 User Store
    "#);
}

/// Prints the resolved runtime settings.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Application: {} {}", config.app.name, config.app.version);
    info!("Environment: {}", config.app.environment);
    info!(
        "Pool:        {}..{} connections",
        config.database.min_connections, config.database.max_connections
    );
    info!("{}", separator);
}

/// Connects to the store, creates the users table and index, and checks
/// the pool answers. The pool is closed before returning either way.
pub async fn bootstrap(config: &AppConfig) -> AzchatResult<()> {
    let module = build_user_store_module(&config.database).await?;

    let repository: Arc<dyn UserRepository> = module.resolve();
    let pool: Arc<dyn DatabasePoolInterface> = module.resolve();

    let result = prepare_store(repository.as_ref(), pool.as_ref()).await;

    if let Err(e) = &result {
        error!(code = e.error_code(), "Bootstrap failed: {}", e);
    }

    pool.close().await;
    result
}

async fn prepare_store(
    repository: &dyn UserRepository,
    pool: &dyn DatabasePoolInterface,
) -> AzchatResult<()> {
    repository.ensure_schema().await?;
    pool.health_check().await?;
    info!("User store schema ready and database reachable");
    Ok(())
}
