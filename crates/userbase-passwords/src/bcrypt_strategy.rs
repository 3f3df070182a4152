use anyhow::{Context, anyhow};
use async_trait::async_trait;
use tracing::instrument;
use userbase_core::AppError;
use userbase_config::passwords::DEFAULT_BCRYPT_COST;

use crate::strategy::PasswordStrategy;

/// Salted bcrypt hashing with a configurable cost factor.
///
/// Hashing and verification run on tokio's blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct BcryptStrategy {
    cost: u32,
}

impl BcryptStrategy {
    pub fn new() -> Self {
        Self::with_cost(DEFAULT_BCRYPT_COST)
    }

    /// A cost outside bcrypt's accepted range is not rejected here; it
    /// surfaces as an error from [`encrypt`](PasswordStrategy::encrypt).
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordStrategy for BcryptStrategy {
    #[instrument(skip_all, fields(cost = self.cost))]
    async fn encrypt(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("Password hashing task failed")?
            .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
    }

    #[instrument(skip_all)]
    async fn matches(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("Password verification task failed")?
            .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
    }
}
