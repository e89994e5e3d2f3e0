//! Turn-sync configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Display name for plateau owners missing from the roster.
pub const AI_LABEL: &str = "AI";

/// Tuning for the turn-sync core.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Safety-poll delay in multiplayer games (milliseconds).
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Safety-poll delay in solo games (milliseconds).
    #[serde(default = "default_solo_poll_interval_ms")]
    solo_poll_interval_ms: u64,

    /// Player id the server uses for the AI opponent.
    #[serde(default = "default_ai_player_id")]
    ai_player_id: String,

    /// Display name for unresolved plateau owners.
    #[serde(default = "default_ai_label")]
    ai_label: String,
}

#[instrument]
fn default_poll_interval_ms() -> u64 {
    3000
}

#[instrument]
fn default_solo_poll_interval_ms() -> u64 {
    1000
}

#[instrument]
fn default_ai_player_id() -> String {
    "mcts_ai".to_string()
}

#[instrument]
fn default_ai_label() -> String {
    AI_LABEL.to_string()
}

impl SyncConfig {
    /// Creates a configuration with the given poll intervals.
    #[instrument]
    pub fn new(poll_interval_ms: u64, solo_poll_interval_ms: u64) -> Self {
        Self {
            poll_interval_ms,
            solo_poll_interval_ms,
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let config = Self::from_toml(&content)?;
        info!(
            poll_interval_ms = config.poll_interval_ms,
            solo_poll_interval_ms = config.solo_poll_interval_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.poll_interval_ms == 0 || config.solo_poll_interval_ms == 0 {
            return Err(ConfigError::new(
                "Poll intervals must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }

    /// Safety-poll delay for the given mode.
    pub fn poll_delay(&self, solo: bool) -> Duration {
        if solo {
            Duration::from_millis(self.solo_poll_interval_ms)
        } else {
            Duration::from_millis(self.poll_interval_ms)
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            solo_poll_interval_ms: default_solo_poll_interval_ms(),
            ai_player_id: default_ai_player_id(),
            ai_label: default_ai_label(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = SyncConfig::from_toml("").expect("parse");
        assert_eq!(config, SyncConfig::default());
        assert_eq!(config.ai_label(), AI_LABEL);
    }

    #[test]
    fn test_poll_delay_by_mode() {
        let config = SyncConfig::new(2500, 800);
        assert_eq!(config.poll_delay(false), Duration::from_millis(2500));
        assert_eq!(config.poll_delay(true), Duration::from_millis(800));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = SyncConfig::from_toml("poll_interval_ms = 0").expect_err("zero interval");
        assert!(err.message.contains("greater than zero"));
    }
}
