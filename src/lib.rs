//! Pump19 IRC Golem.
//!
//! Chat command recognition, per-command rate limiting, dispatch, and the
//! command handlers together with the upstream clients they query.

pub mod client;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod services;
pub mod telemetry;
