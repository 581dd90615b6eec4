//! Command recognition configuration.

use serde::Deserialize;
use std::collections::HashMap;

use super::defaults::{default_prefix, default_rate_limit_secs};

/// Command prefix and rate limit configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// Accepted command prefixes. Every character is a prefix on its own,
    /// so `"!&"` accepts both `!help` and `&help`.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Opaque override value, passed through untouched.
    #[serde(default)]
    pub r#override: Option<String>,
    /// Minimum seconds between two runs of the same command (default: 15).
    #[serde(default = "default_rate_limit_secs")]
    pub rate_limit_secs: u64,
    /// Per-command interval overrides, keyed by command name.
    #[serde(default)]
    pub rate_limits: HashMap<String, u64>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            r#override: None,
            rate_limit_secs: default_rate_limit_secs(),
            rate_limits: HashMap::new(),
        }
    }
}

impl CommandsConfig {
    /// Rate limit interval for a command, honoring per-command overrides.
    pub fn interval_secs(&self, command: &str) -> u64 {
        self.rate_limits
            .get(command)
            .copied()
            .unwrap_or(self.rate_limit_secs)
    }

    /// The set of accepted prefix characters.
    pub fn prefixes(&self) -> Vec<char> {
        self.prefix.chars().collect()
    }
}
