//! Configuration for the engine binaries.
//!
//! Loaded once at startup from a TOML file (default
//! `config/settings.toml`, overridable via `ENGINE_CONFIG`), layered
//! with `ENGINE__`-prefixed environment variable overrides (e.g.
//! `ENGINE__BUS__URL=nats://prod:4222`), via the `config` crate.

use std::env;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ReconnectConfig {
    pub max_attempts: u32,
    pub wait_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        ReconnectConfig {
            max_attempts: 5,
            wait_ms: 500,
            connect_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusConfig {
    pub url: String,
    pub orders_subject: String,
    pub trades_subject: String,
    #[serde(default)]
    pub reconnect: ReconnectConfig,
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            url: "nats://localhost:4222".to_string(),
            orders_subject: "orders.in".to_string(),
            trades_subject: "trades.out".to_string(),
            reconnect: ReconnectConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub input_path: String,
    pub output_path: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            input_path: "data/orders.jsonl".to_string(),
            output_path: "data/trades.jsonl".to_string(),
        }
    }
}

/// Top-level settings object shared by both binaries.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub bus: BusConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Config {
    /// Load settings from `ENGINE_CONFIG` (default
    /// `config/settings.toml`), then apply `ENGINE__*` environment
    /// overrides, then validate.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("ENGINE_CONFIG").unwrap_or_else(|_| "config/settings.toml".to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&path).required(false))
            .add_source(
                config::Environment::with_prefix("ENGINE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize().unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.url.trim().is_empty() {
            return Err(ConfigError::Invalid("bus.url must not be empty".into()));
        }
        if self.bus.orders_subject.trim().is_empty() || self.bus.trades_subject.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "bus.orders_subject and bus.trades_subject must not be empty".into(),
            ));
        }
        if self.bus.reconnect.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "bus.reconnect.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
