//! # Userbase Passwords
//!
//! Password hashing strategies behind a single [`PasswordStrategy`] trait.
//!
//! - [`BcryptStrategy`]: salted, cost-tunable hashing. Every digest embeds
//!   its algorithm version, cost and salt, so two digests of the same
//!   password differ and verification needs nothing but the digest.
//! - [`Sha256Strategy`]: unsalted, deterministic hex SHA-256 digest.
//!
//! The strategy in use is chosen at startup from [`PasswordConfig`] and
//! injected into the user service as an `Arc<dyn PasswordStrategy>`.
//!
//! # Example
//!
//! ```ignore
//! use userbase_config::PasswordConfig;
//! use userbase_passwords::build_strategy;
//!
//! let strategy = build_strategy(&PasswordConfig::default());
//! let digest = strategy.encrypt("correct horse").await?;
//! assert!(strategy.matches("correct horse", &digest).await?);
//! ```

pub mod bcrypt_strategy;
pub mod sha256_strategy;
pub mod strategy;

use std::sync::Arc;

use userbase_config::{PasswordConfig, PasswordStrategyKind};

// Re-export commonly used types at crate root
pub use bcrypt_strategy::BcryptStrategy;
pub use sha256_strategy::Sha256Strategy;
pub use strategy::PasswordStrategy;

/// Builds the strategy selected by `config`.
pub fn build_strategy(config: &PasswordConfig) -> Arc<dyn PasswordStrategy> {
    match config.strategy {
        PasswordStrategyKind::Bcrypt => Arc::new(BcryptStrategy::with_cost(config.bcrypt_cost)),
        PasswordStrategyKind::Sha256 => Arc::new(Sha256Strategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_sha256_strategy() {
        let config = PasswordConfig {
            strategy: PasswordStrategyKind::Sha256,
            ..PasswordConfig::default()
        };
        let strategy = build_strategy(&config);

        let digest = strategy.encrypt("qwerty").await.unwrap();
        assert_eq!(digest, Sha256Strategy.encrypt("qwerty").await.unwrap());
    }

    #[tokio::test]
    async fn test_build_bcrypt_strategy_uses_configured_cost() {
        let config = PasswordConfig {
            strategy: PasswordStrategyKind::Bcrypt,
            bcrypt_cost: 5,
        };
        let strategy = build_strategy(&config);

        let digest = strategy.encrypt("qwerty").await.unwrap();
        assert!(digest.starts_with("$2b$05$"));
    }
}
