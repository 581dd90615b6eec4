//! `lrrmc`: status of the LRR Minecraft servers.
//!
//! The probe runs under a short deadline. A server that does not answer in
//! time (or at all) is reported with status `Unknown`; the join info is
//! posted either way.

use crate::commands::{Command, CommandArgs, CommandContext};
use crate::error::CommandResult;
use crate::format::NumberFormat;
use crate::services::{ServerProber, ServerStatus};
use crate::telemetry::spans;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, debug, warn};

/// How long to wait for a status answer.
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(2);

/// A known Minecraft server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinecraftServer {
    pub alias: &'static str,
    pub name: &'static str,
    pub host: &'static str,
    pub port: u16,
    pub info: &'static str,
}

/// Known servers. The first entry is the fallback for unknown aliases.
pub const LRRMC_SERVERS: &[MinecraftServer] = &[
    MinecraftServer {
        alias: "vanilla",
        name: "the LRR Vanilla Minecraft Server",
        host: "minecraft.darkmorford.net",
        port: 25565,
        info: "Check http://minecraft.darkmorford.net:8123/ for the dynamic map.",
    },
    MinecraftServer {
        alias: "snorsh",
        name: "the LRR Modded Minecraft Server",
        host: "ftb.darkmorford.net",
        port: 25565,
        info: "One up James on SnorshCraft.",
    },
];

/// Resolve a server alias, falling back to the vanilla server.
pub fn lookup_server(alias: &str) -> &'static MinecraftServer {
    LRRMC_SERVERS
        .iter()
        .find(|server| server.alias == alias)
        .unwrap_or(&LRRMC_SERVERS[0])
}

/// Compose the `lrrmc` reply. `None` or an empty status means the status
/// is unknown.
pub fn status_message(
    server: &MinecraftServer,
    status: Option<&ServerStatus>,
    format: &NumberFormat,
) -> String {
    let status = match status.filter(|status| !status.is_empty()) {
        None => "Unknown".to_string(),
        Some(status) => {
            let players = status.players.unwrap_or_default();
            let count = |n: Option<u64>| n.map_or_else(|| "?".to_string(), |n| format.count(n));
            format!(
                "Online - {}/{} players",
                count(players.online),
                count(players.max)
            )
        }
    };

    format!(
        "Join {} on {}:{}! {} Current Status: {}",
        server.name, server.host, server.port, server.info, status
    )
}

/// Probes a Minecraft server and posts how to join it.
pub struct LrrmcHandler {
    prober: Arc<dyn ServerProber>,
    format: NumberFormat,
    timeout: Duration,
}

impl LrrmcHandler {
    pub fn new(prober: Arc<dyn ServerProber>, format: NumberFormat) -> Self {
        Self {
            prober,
            format,
            timeout: STATUS_TIMEOUT,
        }
    }

    /// Probe `server`, giving up after the deadline.
    async fn probe(&self, server: &MinecraftServer) -> Option<ServerStatus> {
        let request = self
            .prober
            .get_status(server.host, server.port)
            .instrument(spans::upstream("minecraft"));

        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                warn!(host = server.host, error = %e, code = e.error_code(), "Status probe failed");
                None
            }
            Err(_) => {
                debug!(host = server.host, timeout = ?self.timeout, "Status probe timed out");
                None
            }
        }
    }
}

#[async_trait]
impl Command for LrrmcHandler {
    fn name(&self) -> &'static str {
        "lrrmc"
    }

    async fn handle(&self, ctx: &CommandContext<'_>, args: &CommandArgs) -> CommandResult {
        let server = lookup_server(args.get("server").unwrap_or_default());
        let status = self.probe(server).await;
        ctx.reply(&status_message(server, status.as_ref(), &self.format))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::run;
    use crate::error::ServiceError;
    use crate::services::PlayerCounts;
    use std::sync::Mutex;

    enum Behavior {
        Answer(Option<ServerStatus>),
        Fail,
        Stall,
    }

    struct FakeProber {
        behavior: Behavior,
        probed: Mutex<Vec<(String, u16)>>,
    }

    impl FakeProber {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                probed: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ServerProber for FakeProber {
        async fn get_status(
            &self,
            host: &str,
            port: u16,
        ) -> Result<Option<ServerStatus>, ServiceError> {
            self.probed.lock().unwrap().push((host.to_string(), port));
            match &self.behavior {
                Behavior::Answer(status) => Ok(status.clone()),
                Behavior::Fail => Err(ServiceError::Protocol("refused".into())),
                Behavior::Stall => std::future::pending().await,
            }
        }
    }

    fn online(online: Option<u64>, max: Option<u64>) -> Behavior {
        Behavior::Answer(Some(ServerStatus {
            players: Some(PlayerCounts { online, max }),
            description: None,
        }))
    }

    const VANILLA_PREFIX: &str = "Join the LRR Vanilla Minecraft Server on minecraft.darkmorford.net:25565! \
        Check http://minecraft.darkmorford.net:8123/ for the dynamic map. Current Status: ";

    #[tokio::test]
    async fn test_online_status() {
        let prober = FakeProber::new(online(Some(3), Some(20)));
        let handler = LrrmcHandler::new(prober.clone(), NumberFormat::default());

        let sent = run(&handler, &[("server", "vanilla")]).await;
        assert_eq!(sent, vec![format!("{VANILLA_PREFIX}Online - 3/20 players")]);
        assert_eq!(
            *prober.probed.lock().unwrap(),
            vec![("minecraft.darkmorford.net".to_string(), 25565)]
        );
    }

    #[tokio::test]
    async fn test_named_server() {
        let prober = FakeProber::new(online(Some(1), Some(10)));
        let handler = LrrmcHandler::new(prober.clone(), NumberFormat::default());

        let sent = run(&handler, &[("server", "snorsh")]).await;
        assert_eq!(
            sent,
            vec![
                "Join the LRR Modded Minecraft Server on ftb.darkmorford.net:25565! \
                 One up James on SnorshCraft. Current Status: Online - 1/10 players"
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_alias_falls_back_to_vanilla() {
        let prober = FakeProber::new(Behavior::Answer(None));
        let handler = LrrmcHandler::new(prober.clone(), NumberFormat::default());

        run(&handler, &[("server", "creative")]).await;
        assert_eq!(prober.probed.lock().unwrap()[0].0, "minecraft.darkmorford.net");
    }

    #[tokio::test]
    async fn test_missing_counts_use_placeholder() {
        let handler = LrrmcHandler::new(FakeProber::new(online(Some(5), None)), NumberFormat::default());
        let sent = run(&handler, &[("server", "vanilla")]).await;
        assert_eq!(sent, vec![format!("{VANILLA_PREFIX}Online - 5/? players")]);

        let motd_only = Behavior::Answer(Some(ServerStatus {
            players: None,
            description: Some("LRR Vanilla".into()),
        }));
        let handler = LrrmcHandler::new(FakeProber::new(motd_only), NumberFormat::default());
        let sent = run(&handler, &[("server", "vanilla")]).await;
        assert_eq!(sent, vec![format!("{VANILLA_PREFIX}Online - ?/? players")]);
    }

    #[tokio::test]
    async fn test_empty_status_is_unknown() {
        let empty = Behavior::Answer(Some(ServerStatus::default()));
        let handler = LrrmcHandler::new(FakeProber::new(empty), NumberFormat::default());
        let sent = run(&handler, &[("server", "vanilla")]).await;
        assert_eq!(sent, vec![format!("{VANILLA_PREFIX}Unknown")]);
    }

    #[tokio::test]
    async fn test_no_status_is_unknown() {
        let handler = LrrmcHandler::new(FakeProber::new(Behavior::Answer(None)), NumberFormat::default());
        let sent = run(&handler, &[("server", "vanilla")]).await;
        assert_eq!(sent, vec![format!("{VANILLA_PREFIX}Unknown")]);
    }

    #[tokio::test]
    async fn test_probe_error_is_unknown() {
        let handler = LrrmcHandler::new(FakeProber::new(Behavior::Fail), NumberFormat::default());
        let sent = run(&handler, &[("server", "vanilla")]).await;
        assert_eq!(sent, vec![format!("{VANILLA_PREFIX}Unknown")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_probe_times_out_as_unknown() {
        let handler = LrrmcHandler::new(FakeProber::new(Behavior::Stall), NumberFormat::default());

        let started = tokio::time::Instant::now();
        let sent = run(&handler, &[("server", "vanilla")]).await;

        assert_eq!(sent, vec![format!("{VANILLA_PREFIX}Unknown")]);
        assert!(started.elapsed() >= STATUS_TIMEOUT);
    }

    #[test]
    fn test_grouped_player_counts() {
        let status = ServerStatus {
            players: Some(PlayerCounts {
                online: Some(1200),
                max: Some(5000),
            }),
            description: None,
        };
        let message = status_message(lookup_server("vanilla"), Some(&status), &NumberFormat::grouped(','));
        assert!(message.ends_with("Online - 1,200/5,000 players"));
    }
}
