//! Green-API console server
//!
//! Serves the console actions over HTTP and forwards them to Green-API

use anyhow::{Context, Result};
use greenapi_console::utils::logging::init_logging;
use greenapi_console::{create_router, version_info, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load server settings")?;

    init_logging(&settings.logging)?;
    info!("{}", version_info());

    let addr = settings.bind_address();
    let app = create_router(settings.clone()).await?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🚀 Green-API console started!");
    info!("📝 Health check: http://{}/health", addr);
    info!("🔄 Actions: http://{}/api/{{method}}", addr);
    info!("🌐 Upstream: {}", settings.green_api.base_url);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start server: {}", e))?;

    Ok(())
}
