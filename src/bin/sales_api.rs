//! Sales API server
//!
//! Reads an optional YAML config (path in `SALES_CONFIG`), applies
//! environment overrides, connects the configured store and serves the
//! REST API until Ctrl+C or SIGTERM.

use anyhow::Result;
use sales::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("SALES_CONFIG") {
        Ok(path) if !path.is_empty() => AppConfig::from_yaml_file(&path)?,
        _ => AppConfig::default(),
    }
    .with_process_env()?;

    tracing::info!(
        backend = config.store.backend(),
        addr = %config.addr(),
        "Starting sales API"
    );

    ServerBuilder::from_config(&config)
        .await?
        .serve(&config.addr())
        .await
}
