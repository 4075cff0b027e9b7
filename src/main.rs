use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use showcase::Config;
use showcase::server::{self, ProjectsEndpoint};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    if config.credential().is_none() {
        tracing::warn!("GH_TOKEN is not set; project requests will answer 401");
    }

    let endpoint = Arc::new(
        ProjectsEndpoint::from_config(&config)
            .map_err(|e| anyhow::anyhow!("failed to build GitHub client: {}", e))?,
    );

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %config.bind,
        user = %config.github_user,
        api_base = %config.api_base,
        ttl_secs = config.cache_ttl_secs,
        "serving {}",
        server::PROJECTS_PATH
    );

    server::serve(listener, endpoint).await?;
    Ok(())
}
