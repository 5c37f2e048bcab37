//! House Price Feature Service - Main Entry Point

use api::{init_logging, run_server, ApiConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::load()?;
    init_logging(&config)?;

    info!("=== House Price Feature Service v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Serving {} expected features", config.expected_features().len());

    run_server(config).await?;

    Ok(())
}
