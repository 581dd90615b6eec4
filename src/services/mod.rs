//! Upstream data providers.
//!
//! Command handlers only see the traits defined here:
//! - [`VideoPlatform`]: latest broadcasts and top clips (Twitch Helix)
//! - [`ServerProber`]: game server status (Minecraft Server List Ping)
//! - [`ScrobbleLookup`]: most recently played track (last.fm)
//!
//! Each provider returns explicit result structs with optional fields so
//! handlers can substitute placeholders instead of failing on odd payloads.

pub mod lastfm;
pub mod minecraft;
pub mod twitch;

use crate::config::Config;
use crate::error::ServiceError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub use lastfm::LastFmClient;
pub use minecraft::MinecraftProber;
pub use twitch::TwitchClient;

// ============================================================================
// Result Envelopes
// ============================================================================

/// A past broadcast of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Broadcast {
    pub title: String,
    pub id: String,
    pub status: String,
}

/// A highlighted clip of a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub title: String,
    pub id: String,
    pub view_count: u64,
}

/// Player counts reported by a game server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerCounts {
    pub online: Option<u64>,
    pub max: Option<u64>,
}

/// Status reported by a game server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerStatus {
    pub players: Option<PlayerCounts>,
    pub description: Option<String>,
}

impl ServerStatus {
    /// Extract the fields we care about from a loosely structured status payload.
    ///
    /// Missing or mistyped fields become `None`; this never fails.
    pub fn from_json(value: &Value) -> Self {
        let players = value.get("players").filter(|p| p.is_object()).map(|p| PlayerCounts {
            online: p.get("online").and_then(Value::as_u64),
            max: p.get("max").and_then(Value::as_u64),
        });

        let description = match value.get("description") {
            Some(Value::String(text)) => Some(text.clone()),
            Some(obj @ Value::Object(_)) => obj
                .get("text")
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        };

        Self {
            players,
            description,
        }
    }

    /// Whether the server reported nothing usable.
    pub fn is_empty(&self) -> bool {
        self.players.is_none() && self.description.is_none()
    }
}

/// Most recent scrobble of a last.fm user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrobbleInfo {
    /// Display name as reported by last.fm.
    pub name: String,
    /// Whether the track is playing right now.
    pub live: bool,
    pub track: Option<String>,
    pub artist: Option<String>,
}

// ============================================================================
// Provider Traits
// ============================================================================

/// Video platform queries.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Most recent broadcasts of a channel, newest first.
    async fn get_broadcasts(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<Broadcast>, ServiceError>;

    /// Most viewed clips of a channel.
    async fn get_top_clips(&self, channel_name: &str, limit: usize)
    -> Result<Vec<Clip>, ServiceError>;
}

/// Game server status probe.
///
/// Implementations may stall; callers wrap them in their own deadline.
#[async_trait]
pub trait ServerProber: Send + Sync {
    async fn get_status(&self, host: &str, port: u16) -> Result<Option<ServerStatus>, ServiceError>;
}

/// Scrobble lookup.
#[async_trait]
pub trait ScrobbleLookup: Send + Sync {
    /// `Ok(None)` when the user cannot be resolved.
    async fn get_info(&self, user: &str) -> Result<Option<ScrobbleInfo>, ServiceError>;
}

/// Stand-in for a provider that has no credentials configured.
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured(pub &'static str);

#[async_trait]
impl VideoPlatform for Unconfigured {
    async fn get_broadcasts(&self, _: &str, _: usize) -> Result<Vec<Broadcast>, ServiceError> {
        Err(ServiceError::NotConfigured(self.0))
    }

    async fn get_top_clips(&self, _: &str, _: usize) -> Result<Vec<Clip>, ServiceError> {
        Err(ServiceError::NotConfigured(self.0))
    }
}

#[async_trait]
impl ScrobbleLookup for Unconfigured {
    async fn get_info(&self, _: &str) -> Result<Option<ScrobbleInfo>, ServiceError> {
        Err(ServiceError::NotConfigured(self.0))
    }
}

/// The collaborators handed to command handlers.
#[derive(Clone)]
pub struct Services {
    pub video: Arc<dyn VideoPlatform>,
    pub prober: Arc<dyn ServerProber>,
    pub scrobbles: Arc<dyn ScrobbleLookup>,
}

impl Services {
    /// Build the real providers from configuration.
    pub fn from_config(config: &Config) -> Result<Self, ServiceError> {
        let video: Arc<dyn VideoPlatform> = match config.twitch {
            Some(ref twitch) => Arc::new(TwitchClient::new(twitch.clone())?),
            None => {
                info!("No [twitch] section, vod and clip will report unavailable");
                Arc::new(Unconfigured("twitch"))
            }
        };

        let scrobbles: Arc<dyn ScrobbleLookup> = match config.lastfm {
            Some(ref lastfm) => Arc::new(LastFmClient::new(lastfm.clone())?),
            None => {
                info!("No [lastfm] section, last.fm lookups will fail");
                Arc::new(Unconfigured("last.fm"))
            }
        };

        Ok(Self {
            video,
            prober: Arc::new(MinecraftProber::default()),
            scrobbles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_from_full_payload() {
        let status = ServerStatus::from_json(&json!({
            "version": {"name": "1.20.4", "protocol": 765},
            "players": {"online": 3, "max": 20},
            "description": {"text": "LRR Vanilla"}
        }));
        assert_eq!(
            status.players,
            Some(PlayerCounts {
                online: Some(3),
                max: Some(20)
            })
        );
        assert_eq!(status.description.as_deref(), Some("LRR Vanilla"));
    }

    #[test]
    fn test_status_from_odd_payload() {
        let status = ServerStatus::from_json(&json!({
            "players": {"online": "lots"},
            "description": "plain motd"
        }));
        assert_eq!(
            status.players,
            Some(PlayerCounts {
                online: None,
                max: None
            })
        );
        assert_eq!(status.description.as_deref(), Some("plain motd"));
    }

    #[test]
    fn test_status_without_players() {
        let status = ServerStatus::from_json(&json!({"players": 7}));
        assert_eq!(status.players, None);
        assert_eq!(status.description, None);
        assert!(status.is_empty());

        let status = ServerStatus::from_json(&json!({"description": "motd"}));
        assert!(!status.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_provider_errors() {
        let provider = Unconfigured("twitch");
        let err = provider.get_broadcasts("1", 1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotConfigured("twitch")));
    }
}
