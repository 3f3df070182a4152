use std::fmt::Debug;

use async_trait::async_trait;
use userbase_core::AppError;

/// A one-way password hashing scheme.
///
/// Both operations are async: implementations doing CPU-heavy work must not
/// block the runtime while they run.
#[async_trait]
pub trait PasswordStrategy: Send + Sync + Debug {
    /// Hashes `password` into a digest suitable for storage.
    async fn encrypt(&self, password: &str) -> Result<String, AppError>;

    /// Checks `password` against a digest previously produced by
    /// [`encrypt`](Self::encrypt).
    async fn matches(&self, password: &str, hash: &str) -> Result<bool, AppError>;
}
