//! AI Voice Detection - Main Entry Point

use api::{init_logging, run_server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== AI Voice Detection v{} ===", env!("CARGO_PKG_VERSION"));

    let addr = "0.0.0.0:8001";
    run_server(addr).await?;

    Ok(())
}
