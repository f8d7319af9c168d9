//! Order feeder process.
//!
//! Reads the configured input file line by line (one JSON order event
//! per line) and publishes each to the orders subject at a fixed
//! pace, so a downstream matching engine sees them roughly as a live
//! feed would deliver them rather than all at once.

use std::time::Duration;

use engine_runtime::bus::NatsBus;
use engine_runtime::config::Config;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const PUBLISH_INTERVAL: Duration = Duration::from_millis(200);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    info!(?config, "loaded configuration");

    let mut bus = NatsBus::new(config.bus.clone());
    bus.connect().await?;

    let file = tokio::fs::File::open(&config.engine.input_path).await?;
    let mut lines = BufReader::new(file).lines();

    let mut published = 0usize;
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Err(err) = serde_json::from_str::<serde_json::Value>(line) {
            warn!(line_no, error = %err, "skipping malformed line in input file");
            continue;
        }

        bus.publish(&config.bus.orders_subject, line.as_bytes().to_vec())
            .await?;
        published += 1;
        info!(line_no, published, "published order event");

        tokio::time::sleep(PUBLISH_INTERVAL).await;
    }

    info!(published, "all orders published");
    bus.close().await?;
    Ok(())
}
