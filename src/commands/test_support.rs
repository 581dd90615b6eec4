//! Fakes shared by the command unit tests.

use super::{Command, CommandArgs, CommandContext};
use crate::client::ChatClient;
use crate::error::ClientError;
use async_trait::async_trait;
use std::sync::Mutex;

/// Chat client that records every outbound message.
#[derive(Default)]
pub struct RecordingClient {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingClient {
    /// All `(target, text)` pairs sent so far.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    /// Texts sent so far, targets dropped.
    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
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

/// Run `command` once against a fresh recording client.
pub async fn run(command: &dyn Command, args: &[(&str, &str)]) -> Vec<String> {
    let client = RecordingClient::default();
    let ctx = CommandContext::new(&client, "#loadingreadyrun", "viewer");
    let args: CommandArgs = args.iter().copied().collect();
    command.handle(&ctx, &args).await.unwrap();
    client.texts()
}
