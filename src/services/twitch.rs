//! Twitch Helix client.
//!
//! Only the read endpoints needed by `vod` and `clip` are implemented:
//! - `GET /videos?user_id=&type=archive` for past broadcasts
//! - `GET /users?login=` to resolve a channel login to its broadcaster ID
//! - `GET /clips?broadcaster_id=` for the most viewed clips

use super::{Broadcast, Clip, VideoPlatform};
use crate::config::TwitchConfig;
use crate::error::ServiceError;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Timeout for a single Helix request.
const HELIX_TIMEOUT: Duration = Duration::from_secs(10);

/// Helix wraps every list in a `data` array.
#[derive(Debug, Deserialize)]
struct HelixPage<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct HelixVideo {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct HelixUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct HelixClip {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    view_count: u64,
}

impl From<HelixVideo> for Broadcast {
    fn from(video: HelixVideo) -> Self {
        Self {
            title: video.title,
            id: video.id,
            status: video.kind,
        }
    }
}

impl From<HelixClip> for Clip {
    fn from(clip: HelixClip) -> Self {
        Self {
            title: clip.title,
            id: clip.id,
            view_count: clip.view_count,
        }
    }
}

/// Twitch Helix API client.
pub struct TwitchClient {
    http: reqwest::Client,
    config: TwitchConfig,
}

impl TwitchClient {
    /// Create a new client with the given credentials.
    pub fn new(config: TwitchConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(HELIX_TIMEOUT)
            .user_agent(concat!("pump19/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    /// Issue an authenticated GET and decode the `data` array.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, ServiceError> {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), endpoint);
        debug!(url = %url, ?query, "Helix request");

        let page: HelixPage<T> = self
            .http
            .get(&url)
            .query(query)
            .header("Client-Id", self.config.client_id.as_str())
            .bearer_auth(&self.config.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(page.data)
    }
}

#[async_trait]
impl VideoPlatform for TwitchClient {
    async fn get_broadcasts(
        &self,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<Broadcast>, ServiceError> {
        let first = limit.to_string();
        let videos: Vec<HelixVideo> = self
            .get(
                "videos",
                &[("user_id", channel_id), ("type", "archive"), ("first", first.as_str())],
            )
            .await?;

        Ok(videos.into_iter().map(Broadcast::from).collect())
    }

    async fn get_top_clips(
        &self,
        channel_name: &str,
        limit: usize,
    ) -> Result<Vec<Clip>, ServiceError> {
        let users: Vec<HelixUser> = self.get("users", &[("login", channel_name)]).await?;
        let Some(user) = users.into_iter().next() else {
            debug!(channel = %channel_name, "Unknown Twitch login");
            return Ok(Vec::new());
        };

        let first = limit.to_string();
        let clips: Vec<HelixClip> = self
            .get("clips", &[("broadcaster_id", user.id.as_str()), ("first", first.as_str())])
            .await?;

        // Helix already sorts by views, but don't rely on it.
        let mut clips: Vec<Clip> = clips.into_iter().map(Clip::from).collect();
        clips.sort_by(|a, b| b.view_count.cmp(&a.view_count));
        clips.truncate(limit);
        Ok(clips)
    }
}
