//! last.fm scrobble lookup via `user.getrecenttracks`.

use super::{ScrobbleInfo, ScrobbleLookup};
use crate::config::LastFmConfig;
use crate::error::ServiceError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Timeout for a last.fm request.
const LASTFM_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct RecentTracksResponse {
    recenttracks: RecentTracks,
}

#[derive(Debug, Deserialize)]
struct RecentTracks {
    #[serde(default)]
    track: OneOrMany<Track>,
    #[serde(rename = "@attr")]
    attr: Option<RecentTracksAttr>,
}

#[derive(Debug, Deserialize)]
struct RecentTracksAttr {
    user: Option<String>,
}

/// last.fm collapses single-element lists into a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_first(self) -> Option<T> {
        match self {
            Self::Many(items) => items.into_iter().next(),
            Self::One(item) => Some(item),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Track {
    name: Option<String>,
    artist: Option<TextField>,
    #[serde(rename = "@attr")]
    attr: Option<TrackAttr>,
}

#[derive(Debug, Deserialize)]
struct TextField {
    #[serde(rename = "#text")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrackAttr {
    nowplaying: Option<String>,
}

/// Turn a decoded response into scrobble info for `user`.
fn scrobble_info(user: &str, response: RecentTracksResponse) -> ScrobbleInfo {
    let recent = response.recenttracks;
    let name = recent
        .attr
        .and_then(|attr| attr.user)
        .unwrap_or_else(|| user.to_string());

    let Some(track) = recent.track.into_first() else {
        return ScrobbleInfo {
            name,
            live: false,
            track: None,
            artist: None,
        };
    };

    let live = track
        .attr
        .and_then(|attr| attr.nowplaying)
        .is_some_and(|flag| flag.eq_ignore_ascii_case("true"));

    ScrobbleInfo {
        name,
        live,
        track: track.name.filter(|s| !s.is_empty()),
        artist: track
            .artist
            .and_then(|artist| artist.text)
            .filter(|s| !s.is_empty()),
    }
}

/// last.fm API client.
pub struct LastFmClient {
    http: reqwest::Client,
    config: LastFmConfig,
}

impl LastFmClient {
    /// Create a new client with the given API key.
    pub fn new(config: LastFmConfig) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(LASTFM_TIMEOUT)
            .user_agent(concat!("pump19/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }
}

#[async_trait]
impl ScrobbleLookup for LastFmClient {
    async fn get_info(&self, user: &str) -> Result<Option<ScrobbleInfo>, ServiceError> {
        // last.fm reports API errors (unknown user included) as a JSON body,
        // sometimes with a non-2xx status, so the status code is not checked.
        let body: Value = self
            .http
            .get(&self.config.api_url)
            .query(&[
                ("method", "user.getrecenttracks"),
                ("user", user),
                ("api_key", self.config.api_key.as_str()),
                ("format", "json"),
                ("limit", "1"),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(code) = body.get("error") {
            debug!(user = %user, code = %code, message = ?body.get("message"), "last.fm lookup failed");
            return Ok(None);
        }

        let response: RecentTracksResponse = serde_json::from_value(body)?;
        Ok(Some(scrobble_info(user, response)))
    }
}
