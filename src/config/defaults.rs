//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

// =============================================================================
// Command Defaults
// =============================================================================

pub fn default_prefix() -> String {
    "!".to_string()
}

pub fn default_rate_limit_secs() -> u64 {
    15
}

// =============================================================================
// Upstream Defaults
// =============================================================================

pub fn default_twitch_channel_id() -> String {
    "27132299".to_string()
}

pub fn default_twitch_channel_name() -> String {
    "loadingreadyrun".to_string()
}

pub fn default_twitch_api_url() -> String {
    "https://api.twitch.tv/helix".to_string()
}

pub fn default_lastfm_api_url() -> String {
    "https://ws.audioscrobbler.com/2.0/".to_string()
}
