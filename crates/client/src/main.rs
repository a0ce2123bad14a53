//! Zooscape bot binary.
//!
//! Composition root: loads configuration, installs logging, starts the
//! decision runtime and pumps stdin/stdout through it until the server
//! disconnects or closes the stream.

use anyhow::{Context, Result};
use runtime::{BotRuntime, RuntimeConfig};
use tokio::io::BufReader;
use zoo_bot::{ClientConfig, logging, transport};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env()?;
    let _guard = logging::setup_logging(config.log_dir.as_deref())?;

    let runtime = BotRuntime::start(RuntimeConfig {
        engine: config.engine.clone(),
        command_buffer_size: config.queue_size,
    });
    let handle = runtime.handle();

    if let Some(id) = &config.bot_id {
        handle
            .assign(id.as_str())
            .await
            .context("failed to assign preconfigured bot id")?;
    }

    let stats = transport::run(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &handle,
    )
    .await?;
    tracing::info!(
        snapshots = stats.snapshots,
        rejected = stats.rejected,
        skipped = stats.skipped,
        "session finished"
    );

    drop(handle);
    runtime.shutdown().await?;
    Ok(())
}
