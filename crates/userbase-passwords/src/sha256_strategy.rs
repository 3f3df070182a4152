use async_trait::async_trait;
use sha2::{Digest, Sha256};
use userbase_core::AppError;

use crate::strategy::PasswordStrategy;

/// Unsalted SHA-256, hex encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Strategy;

fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[async_trait]
impl PasswordStrategy for Sha256Strategy {
    async fn encrypt(&self, password: &str) -> Result<String, AppError> {
        Ok(digest(password))
    }

    async fn matches(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        Ok(digest(password) == hash)
    }
}
