//! Store configuration.
//!
//! # Environment Variables
//!
//! - `STORE_BACKEND`: `postgres` (default) or `memory`
//! - `DATABASE_URL`: PostgreSQL connection string, required for `postgres`
//! - `DB_MAX_CONNECTIONS`: pool size (default: 10)
//! - `DB_CONNECT_TIMEOUT_SECS`: acquire timeout (default: 30)
//! - `DB_RETRY_INTERVAL_MS`: delay between startup connection attempts
//!   (default: 1000)

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};

use crate::env_or;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend `{other}`")),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub backend: StoreBackend,
    pub url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub retry_interval: Duration,
}

impl DatabaseConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let backend: StoreBackend = env_or("STORE_BACKEND", StoreBackend::default())?;
        let url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());

        if backend == StoreBackend::Postgres && url.is_none() {
            bail!("DATABASE_URL must be set when STORE_BACKEND is postgres");
        }

        let max_connections: u32 = env_or("DB_MAX_CONNECTIONS", 10)?;
        if max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(Self {
            backend,
            url,
            max_connections,
            connect_timeout: Duration::from_secs(env_or("DB_CONNECT_TIMEOUT_SECS", 30)?),
            retry_interval: Duration::from_millis(env_or("DB_RETRY_INTERVAL_MS", 1000)?),
        })
    }

    /// The connection string, or an error naming the missing variable.
    pub fn database_url(&self) -> anyhow::Result<&str> {
        self.url.as_deref().context("DATABASE_URL must be set")
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            url: None,
            max_connections: 10,
            connect_timeout: Duration::from_secs(30),
            retry_interval: Duration::from_millis(1000),
        }
    }
}
