use anyhow::Context;

use stockpulse_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockpulse_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        utc_offset = %config.utc_offset,
        seed_demo = config.seed_demo,
        "configuration loaded"
    );

    let services = stockpulse_api::app::build_services(&config)
        .await
        .context("failed to initialize services")?;
    let app = stockpulse_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
