//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::commands::CommandsConfig;
use super::defaults::{default_twitch_channel_id, default_twitch_channel_name};
use super::upstream::{LastFmConfig, TwitchConfig};
use crate::format::NumberFormat;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bot identity.
    pub bot: BotConfig,
    /// Command recognition and rate limiting.
    #[serde(default)]
    pub commands: CommandsConfig,
    /// Number formatting used when composing replies.
    #[serde(default)]
    pub format: NumberFormat,
    /// Twitch Helix credentials (vod/clip commands).
    pub twitch: Option<TwitchConfig>,
    /// last.fm credentials (last.fm command).
    pub lastfm: Option<LastFmConfig>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Broadcaster ID queried by `vod`.
    pub fn twitch_channel_id(&self) -> String {
        self.twitch
            .as_ref()
            .map_or_else(default_twitch_channel_id, |t| t.channel_id.clone())
    }

    /// Broadcaster login queried by `clip`.
    pub fn twitch_channel_name(&self) -> String {
        self.twitch
            .as_ref()
            .map_or_else(default_twitch_channel_name, |t| t.channel_name.clone())
    }
}

/// Bot identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// The nickname the bot is known by. Messages targeted at this nick
    /// are private queries and get answered privately.
    pub nickname: String,
}
