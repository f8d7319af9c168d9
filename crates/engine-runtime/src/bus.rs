//! Message bus client.
//!
//! `NatsBus` is the production implementation, backed by `async-nats`.
//! The narrower `TradePublisher` trait exists so the engine loop can be
//! exercised in tests against an in-memory fake instead of a live
//! NATS server.

use std::time::Duration;

use async_nats::Client;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::BusConfig;
use crate::error::BusError;

#[async_trait]
pub trait TradePublisher: Send + Sync {
    async fn publish_trade(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError>;
}

pub struct NatsBus {
    config: BusConfig,
    client: Option<Client>,
}

impl NatsBus {
    pub fn new(config: BusConfig) -> Self {
        NatsBus {
            config,
            client: None,
        }
    }

    /// Connect to the configured NATS server, retrying up to
    /// `reconnect.max_attempts` times with a fixed delay between
    /// attempts.
    pub async fn connect(&mut self) -> Result<(), BusError> {
        if self.client.is_some() {
            info!(url = %self.config.url, "already connected to NATS");
            return Ok(());
        }

        let reconnect = &self.config.reconnect;
        let mut last_err = None;

        for attempt in 1..=reconnect.max_attempts {
            let options = async_nats::ConnectOptions::new()
                .connection_timeout(Duration::from_millis(reconnect.connect_timeout_ms));

            match options.connect(&self.config.url).await {
                Ok(client) => {
                    info!(url = %self.config.url, attempt, "connected to NATS");
                    self.client = Some(client);
                    return Ok(());
                }
                Err(err) => {
                    warn!(url = %self.config.url, attempt, error = %err, "NATS connect attempt failed");
                    last_err = Some(err);
                    if attempt < reconnect.max_attempts {
                        tokio::time::sleep(Duration::from_millis(reconnect.wait_ms)).await;
                    }
                }
            }
        }

        Err(BusError::ConnectFailed {
            url: self.config.url.clone(),
            attempts: reconnect.max_attempts,
            source: last_err.expect("loop runs at least once"),
        })
    }

    /// Drain and close the connection. Safe to call when not connected.
    pub async fn close(&mut self) -> Result<(), BusError> {
        if let Some(client) = self.client.take() {
            match tokio::time::timeout(Duration::from_secs(5), client.drain()).await {
                Ok(Ok(())) => info!("NATS connection drained and closed"),
                Ok(Err(err)) => warn!(error = %err, "error while draining NATS connection"),
                Err(_) => return Err(BusError::DrainTimeout),
            }
        }
        Ok(())
    }

    pub async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError> {
        let client = self.client.as_ref().ok_or(BusError::NotConnected)?;
        client
            .publish(subject.to_string(), payload.into())
            .await
            .map_err(|source| BusError::Publish {
                subject: subject.to_string(),
                source,
            })
    }

    pub async fn subscribe(&self, subject: &str) -> Result<async_nats::Subscriber, BusError> {
        let client = self.client.as_ref().ok_or(BusError::NotConnected)?;
        client
            .subscribe(subject.to_string())
            .await
            .map_err(|source| BusError::Subscribe {
                subject: subject.to_string(),
                source,
            })
    }

    pub async fn health_check(&self) -> Result<bool, BusError> {
        let client = self.client.as_ref().ok_or(BusError::NotConnected)?;
        Ok(matches!(
            client.connection_state(),
            async_nats::connection::State::Connected
        ))
    }
}

#[async_trait]
impl TradePublisher for NatsBus {
    async fn publish_trade(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError> {
        self.publish(subject, payload).await
    }
}

#[cfg(test)]
pub struct RecordingPublisher {
    pub published: std::sync::Mutex<Vec<(String, Vec<u8>)>>,
}

#[cfg(test)]
impl RecordingPublisher {
    pub fn new() -> Self {
        RecordingPublisher {
            published: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl TradePublisher for RecordingPublisher {
    async fn publish_trade(&self, subject: &str, payload: Vec<u8>) -> Result<(), BusError> {
        self.published
            .lock()
            .unwrap()
            .push((subject.to_string(), payload));
        Ok(())
    }
}
