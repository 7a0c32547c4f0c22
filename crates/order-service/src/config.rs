//! Configuration for the order service.
//!
//! Loaded from a TOML file. Every key has a default, so an empty file (or no file at all)
//! yields a working service with the standard `Received -> Preparing -> Ready` sequence
//! advancing every five minutes.
//!
//! ```toml
//! [scheduler]
//! tick_interval_secs = 300
//! cancel_on_missing_order = false
//! statuses = [1, 2, 3]
//!
//! [actors]
//! channel_capacity = 32
//! ```

use crate::model::StatusSequence;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The full error repeats the input; the message alone is enough.
        ConfigError::Parse(err.message().to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub actors: ActorConfig,
}

/// Status automation settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Seconds between two ticks of the same order. Defaults to 300 (5 minutes).
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: u64,
    /// Treat an order the store no longer has as cancelled instead of retrying forever.
    #[serde(default)]
    pub cancel_on_missing_order: bool,
    /// Status ids in progression order; the last one is terminal.
    #[serde(default)]
    pub statuses: StatusSequence,
}

fn default_tick_interval_secs() -> u64 {
    300
}

impl SchedulerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            cancel_on_missing_order: false,
            statuses: StatusSequence::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActorConfig {
    /// Request channel capacity of every actor.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    32
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl ServiceConfig {
    /// Reads and validates a TOML file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        contents.parse()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scheduler.tick_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler.tick_interval_secs must be greater than 0".into(),
            ));
        }
        if self.actors.channel_capacity == 0 {
            return Err(ConfigError::Validation(
                "actors.channel_capacity must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

impl FromStr for ServiceConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: ServiceConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StatusId;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ServiceConfig = "".parse().unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.scheduler.tick_interval(), Duration::from_secs(300));
        assert_eq!(config.scheduler.statuses, StatusSequence::standard());
        assert!(!config.scheduler.cancel_on_missing_order);
        assert_eq!(config.actors.channel_capacity, 32);
    }

    #[test]
    fn test_bundled_config_parses() {
        let config: ServiceConfig = include_str!("../config/order-service.toml")
            .parse()
            .unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_custom_sequence_and_interval() {
        let config: ServiceConfig = r#"
            [scheduler]
            tick_interval_secs = 2
            cancel_on_missing_order = true
            statuses = [10, 20]
        "#
        .parse()
        .unwrap();
        assert_eq!(config.scheduler.tick_interval(), Duration::from_secs(2));
        assert!(config.scheduler.cancel_on_missing_order);
        assert_eq!(config.scheduler.statuses.terminal(), StatusId(20));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let zero = "[scheduler]\ntick_interval_secs = 0\n".parse::<ServiceConfig>();
        assert!(matches!(zero, Err(ConfigError::Validation(_))));

        let capacity = "[actors]\nchannel_capacity = 0\n".parse::<ServiceConfig>();
        assert!(matches!(capacity, Err(ConfigError::Validation(_))));

        let short = "[scheduler]\nstatuses = [1]\n".parse::<ServiceConfig>();
        assert!(matches!(short, Err(ConfigError::Parse(msg)) if msg.contains("at least 2")));

        let duplicate = "[scheduler]\nstatuses = [1, 2, 1]\n".parse::<ServiceConfig>();
        assert!(matches!(duplicate, Err(ConfigError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let result = ServiceConfig::from_file("does/not/exist.toml").await;
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
