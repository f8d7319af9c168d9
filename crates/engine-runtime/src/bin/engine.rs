//! Matching engine process.
//!
//! Loads configuration, connects to NATS, subscribes to the orders
//! subject, and runs every inbound event through the engine loop
//! until a shutdown signal arrives.

use engine_core::Matcher;
use engine_runtime::bus::NatsBus;
use engine_runtime::config::Config;
use engine_runtime::sink::TradeSink;
use futures_util::StreamExt;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    info!(?config, "loaded configuration");

    let mut bus = NatsBus::new(config.bus.clone());
    bus.connect().await?;

    let subscriber = bus.subscribe(&config.bus.orders_subject).await?;
    info!(subject = %config.bus.orders_subject, "subscribed to orders");

    let mut sink = TradeSink::open(&config.engine.output_path).await?;
    let matcher = Matcher::new();

    let inbound = subscriber.map(|message| message.payload.to_vec());

    tokio::select! {
        result = engine_runtime::engine_task::run(
            inbound,
            &matcher,
            &bus,
            &config.bus.trades_subject,
            &mut sink,
        ) => {
            if let Err(err) = result {
                error!(error = %err, "engine loop terminated with an error");
            }
        }
        _ = shutdown_signal() => {
            info!("shutdown signal received");
        }
    }

    bus.close().await?;
    info!("engine stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
