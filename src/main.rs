//! repodo - a personal todo list and GitHub repository browser service.
//!
//! Loads configuration, opens the store and serves the HTTP API.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use repodo_config::Config;
use repodo_server::{AppState, Server};
use repodo_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().context("failed to load configuration")?;

    let database_path = config
        .storage
        .resolve_database_path()
        .context("failed to resolve database path")?;
    let store = Store::open(&database_path)
        .with_context(|| format!("failed to open database at {database_path}"))?;

    let addr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind_addr))?;
    let server = Server::bind(addr, AppState::new(store, &config))
        .await
        .context("failed to bind server")?;

    server.run().await.context("server error")?;
    Ok(())
}
