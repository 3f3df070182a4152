use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use userbase::logging::init_tracing;
use userbase::router::init_router;
use userbase::state::init_app_state;
use userbase_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config.logging);

    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let addrs = config.server.socket_addrs()?;
    let listener = tokio::net::TcpListener::bind(addrs.as_slice())
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.server.host, config.server.port))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    info!(%addr, "Server running");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
