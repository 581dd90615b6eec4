//! Minimum-interval gate for command handlers.
//!
//! Each wrapped handler remembers when its last permitted call started. A
//! call is permitted once at least the interval has passed since then;
//! calls arriving earlier are dropped (not queued) and only logged. Idle
//! time does not accumulate, so a burst after a long pause still runs once.
//! The first call always proceeds.
//!
//! The clock is passed in explicitly so tests can drive time with
//! [`governor::clock::FakeRelativeClock`].

use super::{Command, CommandArgs, CommandContext};
use crate::error::CommandResult;
use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock, Reference};
use parking_lot::Mutex;
use std::time::Duration;
use tracing::warn;

/// A command wrapped in a minimum-interval gate.
pub struct RateLimited<C: Clock = DefaultClock> {
    inner: Box<dyn Command>,
    interval: Duration,
    clock: C,
    /// Start of the last permitted call.
    last: Mutex<Option<C::Instant>>,
}

/// Wrap `handler` so that it runs at most once per `interval`.
///
/// A zero interval never suppresses.
pub fn limit<C: Clock>(handler: Box<dyn Command>, interval: Duration, clock: &C) -> RateLimited<C> {
    RateLimited {
        inner: handler,
        interval,
        clock: clock.clone(),
        last: Mutex::new(None),
    }
}

impl<C: Clock> RateLimited<C> {
    /// Claim the window. Returns `false` if the call must be suppressed.
    ///
    /// Check and update happen under one lock, so concurrent callers
    /// cannot both claim the same window.
    fn try_acquire(&self) -> bool {
        let now = self.clock.now();
        let mut last = self.last.lock();

        let permitted = (*last).is_none_or(|prev| Duration::from(now.duration_since(prev)) >= self.interval);
        if permitted {
            *last = Some(now);
        }
        permitted
    }
}

#[async_trait]
impl<C> Command for RateLimited<C>
where
    C: Clock + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn handle(&self, ctx: &CommandContext<'_>, args: &CommandArgs) -> CommandResult {
        if !self.try_acquire() {
            warn!(
                command = self.inner.name(),
                nick = %ctx.nick,
                interval_secs = self.interval.as_secs_f64(),
                "Suppressed call to {}.",
                self.inner.name()
            );
            return Ok(());
        }

        self.inner.handle(ctx, args).await
    }
}
