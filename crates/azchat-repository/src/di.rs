//! Dependency injection wiring using Shaku.

use crate::{DatabasePool, DatabasePoolParameters, MySqlUserDaoImpl, UserRepositoryImpl};
use azchat_config::DatabaseConfig;
use azchat_core::AzchatResult;
use shaku::module;
use std::sync::Arc;

// Pool, MySQL DAO and repository for a single-process deployment.
module! {
    pub UserStoreModule {
        components = [
            DatabasePool,
            MySqlUserDaoImpl,
            UserRepositoryImpl,
        ],
        providers = [],
    }
}

/// Connects the pool and builds the module around it.
pub async fn build_user_store_module(config: &DatabaseConfig) -> AzchatResult<Arc<UserStoreModule>> {
    let db_pool = DatabasePool::connect(config).await?;

    let module = UserStoreModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.into_inner(),
        })
        .build();

    Ok(Arc::new(module))
}
