//! Advent game client binary.
//!
//! Runs the simulation headless until Ctrl-C, then saves and exits.
//! Configuration comes from the environment (see [`ClientConfig::from_env`]);
//! a `.env` file is honored.

use anyhow::Result;
use advent_client::{Client, ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = logging::setup_logging(&config.session_id)?;

    tracing::info!("Starting Advent client");
    let client = Client::builder().config(config).build().await?;

    client
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", e);
            }
        })
        .await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
