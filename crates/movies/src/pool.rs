//! Connection pool utilities

use crate::config::StoreConfig;
use crate::error::{DbError, DbResult};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

/// Create a connection pool from a store configuration.
///
/// Uses `NoTls`; put TLS termination in front of the database or build the
/// pool yourself if the server requires it.
///
/// # Example
///
/// ```ignore
/// let config = movies::StoreConfig::from_env()?;
/// let pool = movies::create_pool(&config)?;
/// let client = pool.get().await?;
/// ```
pub fn create_pool(config: &StoreConfig) -> DbResult<Pool> {
    let pg_config: tokio_postgres::Config = config
        .database_url
        .parse()
        .map_err(|e: tokio_postgres::Error| DbError::Connection(e.to_string()))?;

    let mgr = Manager::from_config(pg_config, NoTls, default_manager_config());
    Pool::builder(mgr)
        .max_size(config.max_pool_size)
        .build()
        .map_err(|e| DbError::Pool(e.to_string()))
}

fn default_manager_config() -> ManagerConfig {
    ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    }
}
