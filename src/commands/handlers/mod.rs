//! Command handlers, one per command table entry.
//!
//! - `vod`, `clip`: single-result lookups on the video platform
//! - `lrrmc`: deadline-bounded game server probe
//! - `lastfm`: two-stage scrobble lookup
//! - `bingo`, `help`: static links
//! - `roll`: parsed, then deliberately refused

mod info;
mod lastfm;
mod lrrmc;
mod roll;
mod twitch;

pub use info::{BINGO_URL, BingoHandler, COMMAND_URL, HelpHandler};
pub use lastfm::LastFmHandler;
pub use lrrmc::{LRRMC_SERVERS, LrrmcHandler, MinecraftServer, STATUS_TIMEOUT};
pub use roll::{ROLL_REFUSAL, RollHandler};
pub use twitch::{ClipHandler, VodHandler};

use super::Command;
use crate::config::Config;
use crate::services::Services;

/// Build the handler for a command table entry.
///
/// Returns `None` for names without a handler.
pub fn build(name: &str, services: &Services, config: &Config) -> Option<Box<dyn Command>> {
    let handler: Box<dyn Command> = match name {
        "vod" => Box::new(VodHandler::new(
            services.video.clone(),
            config.twitch_channel_id(),
        )),
        "clip" => Box::new(ClipHandler::new(
            services.video.clone(),
            config.twitch_channel_name(),
            config.format,
        )),
        "lrrmc" => Box::new(LrrmcHandler::new(services.prober.clone(), config.format)),
        "lastfm" => Box::new(LastFmHandler::new(services.scrobbles.clone())),
        "roll" => Box::new(RollHandler),
        "bingo" => Box::new(BingoHandler),
        "help" => Box::new(HelpHandler),
        _ => return None,
    };
    Some(handler)
}
