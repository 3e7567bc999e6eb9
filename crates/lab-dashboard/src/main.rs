mod config;
mod wiring;

use std::error::Error;

use client::ApiClient;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::Config::from_env()?;
    let client = ApiClient::new(&config.api_base)?;
    probe_backend(&client).await;

    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!(
        addr = %config.listen_addr,
        api_base = client.base_url(),
        "lab dashboard listening"
    );

    axum::serve(listener, wiring::build_app(client))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// One health request at startup. An unreachable backend is not fatal: the
/// pages report failed requests on their own.
async fn probe_backend(client: &ApiClient) -> bool {
    match client.health().await {
        Ok(body) => {
            tracing::info!(api_base = client.base_url(), %body, "backend reachable");
            true
        }
        Err(err) => {
            tracing::warn!(api_base = client.base_url(), error = %err, "backend health probe failed");
            false
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "could not listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received, stopping");
}
