//! Integration test common infrastructure.
//!
//! In-memory fakes for the chat connection and every upstream provider,
//! plus a helper building a dispatcher over the full command table.

#![allow(dead_code)]

use async_trait::async_trait;
use governor::clock::FakeRelativeClock;
use pump19::client::{ChatClient, MessageEvent};
use pump19::commands::Dispatcher;
use pump19::config::Config;
use pump19::error::{ClientError, ServiceError};
use pump19::services::{
    Broadcast, Clip, ScrobbleInfo, ScrobbleLookup, ServerProber, ServerStatus, Services,
    VideoPlatform,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const CHANNEL: &str = "#loadingreadyrun";

/// Chat client recording every outbound `(target, text)` pair.
#[derive(Default)]
pub struct RecordingClient {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingClient {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl ChatClient for RecordingClient {
    async fn send_message(&self, target: &str, text: &str) -> Result<(), ClientError> {
        self.sent
            .lock()
            .unwrap()
            .push((target.to_string(), text.to_string()));
        Ok(())
    }
}

/// Video platform with one broadcast and one clip.
#[derive(Default)]
pub struct FakeVideo {
    pub calls: AtomicUsize,
}

#[async_trait]
impl VideoPlatform for FakeVideo {
    async fn get_broadcasts(&self, _: &str, _: usize) -> Result<Vec<Broadcast>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Broadcast {
            title: "Desert Bus for Hope".into(),
            id: "42".into(),
            status: "archive".into(),
        }])
    }

    async fn get_top_clips(&self, _: &str, _: usize) -> Result<Vec<Clip>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Clip {
            title: "Wheeler screams".into(),
            id: "LoudClip".into(),
            view_count: 98765,
        }])
    }
}

/// Prober answering every host with a fixed status.
pub struct FakeProber(pub Option<ServerStatus>);

#[async_trait]
impl ServerProber for FakeProber {
    async fn get_status(&self, _: &str, _: u16) -> Result<Option<ServerStatus>, ServiceError> {
        Ok(self.0.clone())
    }
}

/// Scrobble lookup knowing a single user.
pub struct FakeScrobbles;

#[async_trait]
impl ScrobbleLookup for FakeScrobbles {
    async fn get_info(&self, user: &str) -> Result<Option<ScrobbleInfo>, ServiceError> {
        Ok((user == "twistedpear").then(|| ScrobbleInfo {
            name: "TwistedPear".into(),
            live: true,
            track: Some("Still Alive".into()),
            artist: Some("Jonathan Coulton".into()),
        }))
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub client: Arc<RecordingClient>,
    pub clock: FakeRelativeClock,
    pub video: Arc<FakeVideo>,
}

impl Harness {
    /// Dispatcher over the full command table using the given config.
    pub fn new(config_toml: &str) -> Self {
        let config = Config::parse(config_toml).unwrap();
        let client = Arc::new(RecordingClient::default());
        let clock = FakeRelativeClock::default();
        let video = Arc::new(FakeVideo::default());
        let services = Services {
            video: video.clone(),
            prober: Arc::new(FakeProber(None)),
            scrobbles: Arc::new(FakeScrobbles),
        };

        let dispatcher = Dispatcher::with_clock(&config, client.clone(), &services, &clock).unwrap();
        Self {
            dispatcher,
            client,
            clock,
            video,
        }
    }

    /// Send `text` to the channel as `viewer`.
    pub async fn say(&self, text: &str) {
        self.dispatcher
            .dispatch(&MessageEvent::new("viewer", CHANNEL, text))
            .await;
    }
}

pub const DEFAULT_CONFIG: &str = r#"
[bot]
nickname = "pump19"
"#;
