// HTTP server module.
// Routes `GET /api/github` to the project-data endpoint.

pub mod endpoint;
pub mod response;

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, header::IF_NONE_MATCH},
    routing::get,
};

use crate::error::Result;

pub use endpoint::ProjectsEndpoint;
pub use response::{ApiResponse, CacheStatus};

pub const PROJECTS_PATH: &str = "/api/github";

pub fn router(endpoint: Arc<ProjectsEndpoint>) -> Router {
    Router::new()
        .route(PROJECTS_PATH, get(github_projects))
        .with_state(endpoint)
}

async fn github_projects(
    State(endpoint): State<Arc<ProjectsEndpoint>>,
    headers: HeaderMap,
) -> ApiResponse {
    let if_none_match = headers.get(IF_NONE_MATCH).and_then(|v| v.to_str().ok());
    endpoint.respond(if_none_match).await
}

/// Serve until Ctrl-C.
pub async fn serve(listener: tokio::net::TcpListener, endpoint: Arc<ProjectsEndpoint>) -> Result<()> {
    axum::serve(listener, router(endpoint))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
