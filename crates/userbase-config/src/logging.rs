//! Log output configuration.
//!
//! - `LOG_FORMAT`: `pretty` (default) or `json`
//!
//! The filter itself comes from `RUST_LOG` and is handled by the subscriber.

use std::str::FromStr;

use crate::env_or;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            format: env_or("LOG_FORMAT", LogFormat::default())?,
        })
    }
}
