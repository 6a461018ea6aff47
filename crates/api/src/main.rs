use anyhow::Context;

use shopgate_infra::ConfigLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopgate_observability::init();

    let config = ConfigLoader::new().load()?;
    let addr = config.socket_addr()?;

    let app = shopgate_api::app::build_app(&config).await?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
