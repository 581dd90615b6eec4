//! `last.fm`: most recently played track of a last.fm user.

use crate::commands::{Command, CommandArgs, CommandContext};
use crate::error::CommandResult;
use crate::services::{ScrobbleInfo, ScrobbleLookup};
use crate::telemetry::spans;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{Instrument, warn};

/// Compose the `last.fm` reply for `user`.
///
/// `None` means the user could not be resolved at all.
pub fn scrobble_message(user: &str, info: Option<&ScrobbleInfo>) -> String {
    let Some(info) = info else {
        return format!("Cannot query last.fm user information for {user}.");
    };

    let (Some(track), Some(artist)) = (&info.track, &info.artist) else {
        return format!(
            "Cannot query most recently played track for {}.",
            info.name
        );
    };

    let tempus = if info.live {
        "is listening"
    } else {
        "last listened"
    };
    format!("{} {} to \"{}\" by {}", info.name, tempus, track, artist)
}

/// Looks up a user's latest scrobble.
pub struct LastFmHandler {
    scrobbles: Arc<dyn ScrobbleLookup>,
}

impl LastFmHandler {
    pub fn new(scrobbles: Arc<dyn ScrobbleLookup>) -> Self {
        Self { scrobbles }
    }
}

#[async_trait]
impl Command for LastFmHandler {
    fn name(&self) -> &'static str {
        "lastfm"
    }

    async fn handle(&self, ctx: &CommandContext<'_>, args: &CommandArgs) -> CommandResult {
        let user = args.get("user").unwrap_or_default();

        let info = match self
            .scrobbles
            .get_info(user)
            .instrument(spans::upstream("lastfm"))
            .await
        {
            Ok(info) => info,
            Err(e) => {
                warn!(user = %user, error = %e, code = e.error_code(), "last.fm lookup failed");
                None
            }
        };

        ctx.reply(&scrobble_message(user, info.as_ref())).await
    }
}
