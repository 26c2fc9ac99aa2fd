//! RoadWatch Server - Main Entry Point

use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== RoadWatch v{} ===", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!(
        bind_addr = %config.bind_addr,
        database_url = %config.database_url,
        model_path = %config.model_path,
        "configuration loaded"
    );

    run_server(config).await
}
