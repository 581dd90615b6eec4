//! Inbound message dispatch.
//!
//! For every received message the dispatcher:
//! 1. ignores anything not starting with a configured prefix plus at least
//!    one more character
//! 2. strips the prefix
//! 3. resolves the reply target (private queries are answered privately)
//! 4. asks the router for a handler, ignoring unknown commands
//! 5. runs the rate-limited handler, containing any error or panic
//!
//! Dispatches are independent; callers may run many concurrently.

use super::handlers;
use super::limiter::limit;
use super::table::COMMAND_TABLE;
use super::{CommandContext, Router};
use crate::client::{ChatClient, MessageEvent};
use crate::config::Config;
use crate::services::Services;
use crate::telemetry::{CommandTimer, spans};
use futures_util::FutureExt;
use governor::clock::{Clock, DefaultClock};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, debug, error, info, warn};

/// Dispatches chat messages to command handlers.
pub struct Dispatcher {
    client: Arc<dyn ChatClient>,
    router: Router,
    prefixes: Vec<char>,
    nickname: String,
}

impl Dispatcher {
    /// Create a dispatcher over an already populated router.
    pub fn new(
        client: Arc<dyn ChatClient>,
        router: Router,
        prefixes: Vec<char>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            client,
            router,
            prefixes,
            nickname: nickname.into(),
        }
    }

    /// Build the full command set from configuration using the system clock.
    pub fn from_config(
        config: &Config,
        client: Arc<dyn ChatClient>,
        services: &Services,
    ) -> Result<Self, regex::Error> {
        Self::with_clock(config, client, services, &DefaultClock::default())
    }

    /// Build the full command set, rate limiting against `clock`.
    pub fn with_clock<C>(
        config: &Config,
        client: Arc<dyn ChatClient>,
        services: &Services,
        clock: &C,
    ) -> Result<Self, regex::Error>
    where
        C: Clock + Send + Sync + 'static,
    {
        let mut router = Router::new();
        for entry in COMMAND_TABLE {
            let Some(handler) = handlers::build(entry.name, services, config) else {
                warn!(command = entry.name, "No handler for command, skipping");
                continue;
            };

            let interval = Duration::from_secs(config.commands.interval_secs(entry.name));
            router.register(entry.compile()?, Box::new(limit(handler, interval, clock)));
        }

        info!(
            commands = router.len(),
            prefix = %config.commands.prefix,
            "Command routing ready"
        );

        Ok(Self::new(
            client,
            router,
            config.commands.prefixes(),
            config.bot.nickname.clone(),
        ))
    }

    /// Strip a command prefix, returning the command text.
    ///
    /// `None` unless `text` starts with a known prefix followed by at
    /// least one more character.
    pub fn strip_prefix<'t>(&self, text: &'t str) -> Option<&'t str> {
        let mut chars = text.chars();
        let first = chars.next()?;
        if !self.prefixes.contains(&first) {
            return None;
        }
        let rest = chars.as_str();
        (!rest.is_empty()).then_some(rest)
    }

    /// Where replies to `event` go.
    ///
    /// Messages sent to the bot's own nick are private queries and get
    /// answered to the sender instead.
    pub fn reply_target<'e>(&self, event: &'e MessageEvent) -> &'e str {
        if event.target.eq_ignore_ascii_case(&self.nickname) {
            &event.nick
        } else {
            &event.target
        }
    }

    /// Handle one inbound message.
    ///
    /// Never fails: unknown commands are ignored and handler errors or
    /// panics are logged and swallowed.
    pub async fn dispatch(&self, event: &MessageEvent) {
        let Some(command) = self.strip_prefix(&event.text) else {
            return;
        };

        info!(command = %command, nick = %event.nick, "Got command \"{}\" from {}.", command, event.nick);

        let target = self.reply_target(event);
        let Some((handler, args)) = self.router.resolve(command) else {
            debug!(command = %command, "No route for command");
            return;
        };

        let ctx = CommandContext::new(self.client.as_ref(), target, &event.nick);
        let span = spans::command(handler.name(), &event.nick, target);
        let _timer = CommandTimer::new(handler.name());

        let outcome = AssertUnwindSafe(handler.handle(&ctx, &args))
            .catch_unwind()
            .instrument(span)
            .await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(command = handler.name(), nick = %event.nick, error = %e, "Command failed");
            }
            Err(panic) => {
                error!(
                    command = handler.name(),
                    nick = %event.nick,
                    panic = panic_message(panic.as_ref()),
                    "Command panicked"
                );
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic>")
}
