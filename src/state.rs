use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use userbase_config::{AppConfig, CorsConfig, StoreBackend};
use userbase_db::init_db_pool;
use userbase_passwords::build_strategy;

use crate::modules::users::{InMemoryUserStore, PgUserStore, UserService, UserStore};

#[derive(Clone, Debug)]
pub struct AppState {
    pub users: UserService,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(users: UserService, cors_config: CorsConfig) -> Self {
        Self { users, cors_config }
    }
}

/// Builds the store and hashing strategy selected by `config`.
///
/// For the Postgres backend this waits for the database and applies
/// pending migrations before returning.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn UserStore> = match config.database.backend {
        StoreBackend::Postgres => {
            let pool = init_db_pool(&config.database).await?;
            sqlx::migrate!()
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            Arc::new(PgUserStore::new(pool))
        }
        StoreBackend::Memory => Arc::new(InMemoryUserStore::new()),
    };

    info!(
        store = %config.database.backend,
        password_strategy = %config.passwords.strategy,
        "Application state initialized"
    );

    let users = UserService::new(store, build_strategy(&config.passwords));
    Ok(AppState::new(users, config.cors.clone()))
}
