//! Line-oriented stdio transport.
//!
//! Inbound lines use the IRC `PRIVMSG` shape:
//!
//! ```text
//! :nick!user@host PRIVMSG #channel :message text
//! ```
//!
//! Outbound messages are written back in the same shape without a source
//! prefix, one per line. Anything else on input is skipped.
//!
//! Input is split with [`InboundCodec`], which never ends the stream on a
//! bad line: over-long lines are reported and discarded, invalid UTF-8 is
//! replaced.

use crate::client::{ChatClient, MessageEvent};
use crate::error::ClientError;
use async_trait::async_trait;
use bytes::BytesMut;
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Decoder};

/// One unit of inbound input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundLine {
    /// A complete line, lossily decoded.
    Text(String),
    /// A line longer than the limit; its bytes were dropped.
    Oversized,
}

/// Newline-delimited decoder that survives malformed lines.
#[derive(Debug, Clone)]
pub struct InboundCodec {
    inner: AnyDelimiterCodec,
}

impl InboundCodec {
    /// Decoder dropping lines longer than `max_length` bytes.
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), b"\n".to_vec(), max_length),
        }
    }

    fn convert(
        result: Result<Option<bytes::Bytes>, AnyDelimiterCodecError>,
    ) -> Result<Option<InboundLine>, io::Error> {
        match result {
            Ok(Some(chunk)) => Ok(Some(InboundLine::Text(
                String::from_utf8_lossy(&chunk).into_owned(),
            ))),
            Ok(None) => Ok(None),
            // The inner codec keeps discarding up to the next delimiter.
            Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => Ok(Some(InboundLine::Oversized)),
            Err(AnyDelimiterCodecError::Io(e)) => Err(e),
        }
    }
}

impl Decoder for InboundCodec {
    type Item = InboundLine;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<InboundLine>, io::Error> {
        Self::convert(self.inner.decode(buf))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<InboundLine>, io::Error> {
        Self::convert(self.inner.decode_eof(buf))
    }
}

/// Decode one inbound line into a [`MessageEvent`].
pub fn parse_privmsg(line: &str) -> Option<MessageEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    let rest = line.strip_prefix(':')?;

    let (source, rest) = rest.split_once(' ')?;
    let nick = source.split(['!', '@']).next().filter(|n| !n.is_empty())?;

    let rest = rest.trim_start_matches(' ');
    let (verb, rest) = rest.split_once(' ')?;
    if !verb.eq_ignore_ascii_case("PRIVMSG") {
        return None;
    }

    let (target, text) = rest.trim_start_matches(' ').split_once(' ')?;
    let text = text.strip_prefix(':').unwrap_or(text);
    if target.is_empty() {
        return None;
    }

    Some(MessageEvent::new(nick, target, text))
}

/// [`ChatClient`] writing `PRIVMSG` lines to an async writer.
pub struct ConsoleClient<W> {
    writer: Mutex<W>,
}

impl ConsoleClient<tokio::io::Stdout> {
    /// Console client on the process stdout.
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W> ConsoleClient<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W> ChatClient for ConsoleClient<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send_message(&self, target: &str, text: &str) -> Result<(), ClientError> {
        // One line per message; embedded newlines would split it.
        let text = text.replace(['\r', '\n'], " ");
        let line = format!("PRIVMSG {target} :{text}\r\n");

        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}
