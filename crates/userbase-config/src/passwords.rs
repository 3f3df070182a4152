//! Password hashing configuration.
//!
//! # Environment Variables
//!
//! - `PASSWORD_STRATEGY`: `bcrypt` (default) or `sha256`
//! - `BCRYPT_COST`: bcrypt cost factor, 4 to 31 (default: 12)

use std::fmt;
use std::str::FromStr;

use anyhow::bail;

use crate::env_or;

pub const DEFAULT_BCRYPT_COST: u32 = 12;
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Which hashing strategy new password digests are produced with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PasswordStrategyKind {
    #[default]
    Bcrypt,
    Sha256,
}

impl FromStr for PasswordStrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(Self::Bcrypt),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            other => Err(format!("unknown password strategy `{other}`")),
        }
    }
}

impl fmt::Display for PasswordStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bcrypt => f.write_str("bcrypt"),
            Self::Sha256 => f.write_str("sha256"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordConfig {
    pub strategy: PasswordStrategyKind,
    pub bcrypt_cost: u32,
}

impl PasswordConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            strategy: env_or("PASSWORD_STRATEGY", PasswordStrategyKind::default())?,
            bcrypt_cost: env_or("BCRYPT_COST", DEFAULT_BCRYPT_COST)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            bail!(
                "BCRYPT_COST must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}, got {}",
                self.bcrypt_cost
            );
        }
        Ok(())
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            strategy: PasswordStrategyKind::Bcrypt,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}
