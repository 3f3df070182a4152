//! # Userbase Config
//!
//! Configuration types for the Userbase API, loaded from environment
//! variables. Each concern has its own struct with a `from_env()`
//! constructor; [`AppConfig`] bundles them for startup.
//!
//! - [`cors`]: CORS allowed origins
//! - [`database`]: Store backend selection and Postgres pool settings
//! - [`logging`]: Log output format
//! - [`passwords`]: Password hashing strategy and bcrypt cost
//! - [`server`]: Bind address
//!
//! # Example
//!
//! ```ignore
//! use userbase_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env()?;
//! println!("listening on {:?}", config.server.socket_addrs()?);
//! ```

pub mod cors;
pub mod database;
pub mod logging;
pub mod passwords;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::{DatabaseConfig, StoreBackend};
pub use logging::{LogFormat, LoggingConfig};
pub use passwords::{PasswordConfig, PasswordStrategyKind};
pub use server::ServerConfig;

use std::env;
use std::str::FromStr;

use anyhow::{Context, anyhow};

/// Every configuration section needed to start the server.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub passwords: PasswordConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            passwords: PasswordConfig::from_env()?,
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::from_env()?,
        })
    }
}

/// Reads `key` and parses it, falling back to `default` when unset or empty.
///
/// A value that is present but unparseable is an error rather than a silent
/// fallback.
pub(crate) fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Invalid value for {key}: {raw:?}")),
        _ => Ok(default),
    }
}
