//! Upstream provider configuration.

use serde::Deserialize;

use super::defaults::{
    default_lastfm_api_url, default_twitch_api_url, default_twitch_channel_id,
    default_twitch_channel_name,
};

/// Twitch Helix API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TwitchConfig {
    /// Application client ID (sent as `Client-Id`).
    pub client_id: String,
    /// App access token (sent as `Authorization: Bearer`).
    pub token: String,
    /// Broadcaster user ID queried by `vod`.
    #[serde(default = "default_twitch_channel_id")]
    pub channel_id: String,
    /// Broadcaster login queried by `clip`.
    #[serde(default = "default_twitch_channel_name")]
    pub channel_name: String,
    #[serde(default = "default_twitch_api_url")]
    pub api_url: String,
}

/// last.fm API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LastFmConfig {
    pub api_key: String,
    #[serde(default = "default_lastfm_api_url")]
    pub api_url: String,
}
