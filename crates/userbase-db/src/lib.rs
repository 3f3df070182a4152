//! # Userbase DB
//!
//! PostgreSQL pool initialization for the Userbase API.
//!
//! The pool is created once at startup and shared by cloning. If the
//! database is unreachable when the process starts, [`init_db_pool`] keeps
//! retrying at the configured interval instead of exiting, so the service
//! can be started before its database.
//!
//! # Example
//!
//! ```ignore
//! use userbase_config::DatabaseConfig;
//! use userbase_db::init_db_pool;
//!
//! let config = DatabaseConfig::from_env()?;
//! let pool = init_db_pool(&config).await?;
//! ```

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};
use userbase_config::DatabaseConfig;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Pool options derived from `config`.
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout)
}

/// Connects to the database named by `DATABASE_URL`.
///
/// Connection failures are logged and retried every
/// `config.retry_interval`, without an attempt limit. Only a missing URL is
/// returned as an error.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let database_url = config.database_url().context("Cannot connect to database")?;
    let mut attempt: u64 = 0;

    loop {
        attempt += 1;
        match pool_options(config).connect(database_url).await {
            Ok(pool) => {
                info!(attempt, "Connected to database");
                return Ok(pool);
            }
            Err(e) => {
                warn!(
                    attempt,
                    error = %e,
                    retry_in_ms = %config.retry_interval.as_millis(),
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(config.retry_interval).await;
            }
        }
    }
}
