use std::env;

use anyhow::{Context, Result};
use voyage_api::{build_app, ApiConfig, BIND_ENV, DEFAULT_BIND};
use voyage_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("voyage_api");

    let config = ApiConfig::from_env()?;
    let endpoint = config.generation.endpoint.clone();
    let bind = env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string());

    let app = build_app(config)?;

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(bind = %bind, endpoint = %endpoint, "voyage planner api started");

    axum::serve(listener, app).await?;
    Ok(())
}
