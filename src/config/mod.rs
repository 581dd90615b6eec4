//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, BotConfig)
//! - [`commands`]: Command prefix, override and rate limit settings (CommandsConfig)
//! - [`upstream`]: Upstream provider credentials (TwitchConfig, LastFmConfig)
//! - [`validation`]: Startup validation of loaded values

mod commands;
mod defaults;
mod types;
mod upstream;
mod validation;

pub use commands::CommandsConfig;
pub use types::{BotConfig, Config, ConfigError};
pub use upstream::{LastFmConfig, TwitchConfig};
pub use validation::{ValidationError, validate};
