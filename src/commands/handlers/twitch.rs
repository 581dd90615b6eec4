//! `vod` and `clip`: single-result lookups on the video platform.

use crate::commands::{Command, CommandArgs, CommandContext};
use crate::error::CommandResult;
use crate::format::NumberFormat;
use crate::services::{Broadcast, Clip, VideoPlatform};
use crate::telemetry::spans;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{Instrument, warn};

const NO_BROADCAST: &str = "No broadcast is available right now.";
const NO_CLIP: &str = "No clip is available right now.";

/// Compose the `vod` reply.
pub fn broadcast_message(broadcast: Option<&Broadcast>) -> String {
    match broadcast {
        Some(vod) => format!(
            "Latest Broadcast: {} [{}] | https://www.twitch.tv/videos/{}",
            vod.title, vod.status, vod.id
        ),
        None => NO_BROADCAST.to_string(),
    }
}

/// Compose the `clip` reply.
pub fn clip_message(clip: Option<&Clip>, format: &NumberFormat) -> String {
    match clip {
        Some(clip) => format!(
            "Top Clip: {} [{} views] | https://clips.twitch.tv/{}",
            clip.title,
            format.count(clip.view_count),
            clip.id
        ),
        None => NO_CLIP.to_string(),
    }
}

/// Posts the most recent broadcast.
pub struct VodHandler {
    video: Arc<dyn VideoPlatform>,
    channel_id: String,
}

impl VodHandler {
    pub fn new(video: Arc<dyn VideoPlatform>, channel_id: String) -> Self {
        Self { video, channel_id }
    }
}

#[async_trait]
impl Command for VodHandler {
    fn name(&self) -> &'static str {
        "vod"
    }

    async fn handle(&self, ctx: &CommandContext<'_>, _args: &CommandArgs) -> CommandResult {
        let broadcast = match self
            .video
            .get_broadcasts(&self.channel_id, 1)
            .instrument(spans::upstream("twitch"))
            .await
        {
            Ok(broadcasts) => broadcasts.into_iter().next(),
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Broadcast lookup failed");
                None
            }
        };

        ctx.reply(&broadcast_message(broadcast.as_ref())).await
    }
}

/// Posts the most viewed clip.
pub struct ClipHandler {
    video: Arc<dyn VideoPlatform>,
    channel_name: String,
    format: NumberFormat,
}

impl ClipHandler {
    pub fn new(video: Arc<dyn VideoPlatform>, channel_name: String, format: NumberFormat) -> Self {
        Self {
            video,
            channel_name,
            format,
        }
    }
}

#[async_trait]
impl Command for ClipHandler {
    fn name(&self) -> &'static str {
        "clip"
    }

    async fn handle(&self, ctx: &CommandContext<'_>, _args: &CommandArgs) -> CommandResult {
        let clip = match self
            .video
            .get_top_clips(&self.channel_name, 1)
            .instrument(spans::upstream("twitch"))
            .await
        {
            Ok(clips) => clips.into_iter().next(),
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Clip lookup failed");
                None
            }
        };

        ctx.reply(&clip_message(clip.as_ref(), &self.format)).await
    }
}
