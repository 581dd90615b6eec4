//! Boundary to the chat connection.
//!
//! The bot never speaks the wire protocol itself. It consumes normalized
//! [`MessageEvent`]s and answers through a [`ChatClient`].

use crate::error::ClientError;
use async_trait::async_trait;

/// A received chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    /// Nickname of the sender.
    pub nick: String,
    /// Channel name, or the bot's own nick for a private query.
    pub target: String,
    /// Raw message text.
    pub text: String,
}

impl MessageEvent {
    pub fn new(nick: impl Into<String>, target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            target: target.into(),
            text: text.into(),
        }
    }
}

/// Outbound side of the chat connection.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a message to a channel or nick.
    async fn send_message(&self, target: &str, text: &str) -> Result<(), ClientError>;
}
