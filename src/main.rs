//! pump19 - Pump19 IRC Golem
//!
//! Reads chat lines from stdin, dispatches commands, and writes replies to
//! stdout. Logs go to stderr.

use futures_util::StreamExt;
use pump19::client::ChatClient;
use pump19::commands::Dispatcher;
use pump19::config::{Config, validate};
use pump19::console::{ConsoleClient, InboundCodec, InboundLine, parse_privmsg};
use pump19::services::Services;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::codec::FramedRead;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Upper bound on a single inbound line.
const MAX_LINE_LENGTH: usize = 8192;

/// How long in-flight dispatches get to finish on shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the chat transport
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "pump19.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} configuration error(s). See error messages above.",
            errors.len()
        ));
    }

    info!(
        nickname = %config.bot.nickname,
        prefix = %config.commands.prefix,
        twitch = config.twitch.is_some(),
        lastfm = config.lastfm.is_some(),
        "Starting pump19"
    );
    if let Some(ref value) = config.commands.r#override {
        info!(value = %value, "Command override configured");
    }

    let services = Services::from_config(&config)?;
    let client: Arc<dyn ChatClient> = Arc::new(ConsoleClient::stdout());
    let dispatcher = Arc::new(Dispatcher::from_config(&config, client, &services)?);

    let mut lines = FramedRead::new(tokio::io::stdin(), InboundCodec::new(MAX_LINE_LENGTH));
    let mut tasks: JoinSet<()> = JoinSet::new();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next() => match line {
                Some(Ok(InboundLine::Text(line))) => {
                    let Some(event) = parse_privmsg(&line) else {
                        debug!(line = %line, "Ignoring non-PRIVMSG line");
                        continue;
                    };
                    let dispatcher = Arc::clone(&dispatcher);
                    tasks.spawn(async move { dispatcher.dispatch(&event).await });
                }
                Some(Ok(InboundLine::Oversized)) => {
                    warn!(max = MAX_LINE_LENGTH, "Dropping over-long input line");
                }
                Some(Err(e)) => {
                    error!(error = %e, "Failed to read input, shutting down");
                    break;
                }
                None => {
                    info!("Input closed, shutting down");
                    break;
                }
            },
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                if let Err(e) = joined {
                    error!(error = %e, "Dispatch task failed");
                }
            }
            _ = &mut shutdown => break,
        }
    }

    let in_flight = tasks.len();
    if in_flight > 0 {
        info!(count = in_flight, "Waiting for in-flight commands to finish");
        let drained = tokio::time::timeout(DRAIN_TIMEOUT, async {
            while tasks.join_next().await.is_some() {}
        })
        .await;
        if drained.is_err() {
            warn!(count = tasks.len(), "Abandoning unfinished commands");
        }
    }
    info!("Shutdown complete");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
