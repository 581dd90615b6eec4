//! Chat command recognition and dispatch.
//!
//! ## Pipeline
//!
//! ```text
//! MessageEvent ─► Dispatcher ─► Router ─► RateLimited ─► handler ─► ChatClient
//!                 prefix,        first      min-interval   optional
//!                 reply target   match      gate           upstream call
//! ```
//!
//! - [`table`]: the fixed command table (name, pattern, argument defaults)
//! - [`router`]: ordered pattern bindings, first match wins
//! - [`limiter`]: per-command minimum interval gate
//! - [`dispatcher`]: entry point for inbound messages
//! - [`handlers`]: one handler per command

pub mod dispatcher;
pub mod handlers;
pub mod limiter;
pub mod router;
pub mod table;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatcher::Dispatcher;
pub use limiter::{RateLimited, limit};
pub use router::Router;
pub use table::{COMMAND_TABLE, CommandPattern, CommandEntry};

use crate::client::ChatClient;
use crate::error::CommandResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// Named arguments extracted from a command.
///
/// Optional captures that did not participate in the match are either
/// absent or replaced by the default declared in the command table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs(HashMap<String, String>);

impl CommandArgs {
    /// Get an argument by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CommandArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Per-invocation context passed to each command handler.
pub struct CommandContext<'a> {
    /// Outbound side of the chat connection.
    pub client: &'a dyn ChatClient,
    /// Where replies go (channel, or the sender for private queries).
    pub target: &'a str,
    /// Nick of the user who issued the command.
    pub nick: &'a str,
}

impl<'a> CommandContext<'a> {
    pub fn new(client: &'a dyn ChatClient, target: &'a str, nick: &'a str) -> Self {
        Self {
            client,
            target,
            nick,
        }
    }

    /// Send a message to the reply target.
    pub async fn reply(&self, text: &str) -> CommandResult {
        self.client.send_message(self.target, text).await?;
        Ok(())
    }
}

/// Trait implemented by all command handlers.
#[async_trait]
pub trait Command: Send + Sync {
    /// Command name as listed in the command table.
    fn name(&self) -> &'static str;

    /// Run the command.
    async fn handle(&self, ctx: &CommandContext<'_>, args: &CommandArgs) -> CommandResult;
}
