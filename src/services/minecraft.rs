//! Minecraft Server List Ping.
//!
//! Speaks just enough of the Java Edition protocol to ask a server for its
//! status JSON:
//!
//! ```text
//! C→S  Handshake      [len][0x00][proto=-1][host][port u16][next=1]
//! C→S  Status Request [len][0x00]
//! S→C  Status         [len][0x00][json string]
//! ```
//!
//! Every length and integer is a VarInt; strings are VarInt-prefixed UTF-8.

use super::{ServerProber, ServerStatus};
use crate::error::ServiceError;
use async_trait::async_trait;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// Upper bound for a status response frame.
const MAX_FRAME_LEN: usize = 1 << 20;

/// Protocol version sent in the handshake; -1 means "just tell me".
const PROTOCOL_VERSION: i32 = -1;

/// Status probe using the Server List Ping protocol.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinecraftProber;

#[async_trait]
impl ServerProber for MinecraftProber {
    async fn get_status(&self, host: &str, port: u16) -> Result<Option<ServerStatus>, ServiceError> {
        let mut stream = TcpStream::connect((host, port)).await?;
        debug!(host = %host, port = port, "Connected for status ping");

        stream.write_all(&handshake_frame(host, port)).await?;
        stream.write_all(&frame(&[0x00])).await?;
        stream.flush().await?;

        let mut packet = read_frame(&mut stream).await?;
        let packet_id = get_varint(&mut packet)?;
        if packet_id != 0x00 {
            return Err(ServiceError::Protocol(format!(
                "unexpected status packet id {packet_id:#04x}"
            )));
        }

        let json = get_string(&mut packet)?;
        let value: Value = serde_json::from_str(&json)?;
        Ok(Some(ServerStatus::from_json(&value)))
    }
}

// ============================================================================
// Framing
// ============================================================================

fn put_varint(buf: &mut BytesMut, value: i32) {
    let mut value = value as u32;
    loop {
        if value & !0x7F == 0 {
            buf.put_u8(value as u8);
            return;
        }
        buf.put_u8((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
}

fn put_string(buf: &mut BytesMut, value: &str) {
    put_varint(buf, value.len() as i32);
    buf.put_slice(value.as_bytes());
}

/// Prefix a packet body with its VarInt length.
fn frame(body: &[u8]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(body.len() + 5);
    put_varint(&mut buf, body.len() as i32);
    buf.put_slice(body);
    buf
}

fn handshake_frame(host: &str, port: u16) -> BytesMut {
    let mut body = BytesMut::new();
    put_varint(&mut body, 0x00);
    put_varint(&mut body, PROTOCOL_VERSION);
    put_string(&mut body, host);
    body.put_u16(port);
    put_varint(&mut body, 1);
    frame(&body)
}

fn get_varint(buf: &mut Bytes) -> Result<i32, ServiceError> {
    let mut value: u32 = 0;
    for shift in (0..35).step_by(7) {
        if !buf.has_remaining() {
            return Err(ServiceError::Protocol("truncated VarInt".into()));
        }
        let byte = buf.get_u8();
        value |= u32::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value as i32);
        }
    }
    Err(ServiceError::Protocol("VarInt too long".into()))
}

fn get_string(buf: &mut Bytes) -> Result<String, ServiceError> {
    let len = usize::try_from(get_varint(buf)?)
        .map_err(|_| ServiceError::Protocol("negative string length".into()))?;
    if len > buf.remaining() {
        return Err(ServiceError::Protocol("truncated string".into()));
    }
    String::from_utf8(buf.split_to(len).to_vec())
        .map_err(|e| ServiceError::Protocol(format!("invalid UTF-8: {e}")))
}

async fn read_varint<R: AsyncRead + Unpin>(reader: &mut R) -> Result<i32, ServiceError> {
    let mut value: u32 = 0;
    for shift in (0..35).step_by(7) {
        let byte = reader.read_u8().await?;
        value |= u32::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value as i32);
        }
    }
    Err(ServiceError::Protocol("VarInt too long".into()))
}

async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Bytes, ServiceError> {
    let len = usize::try_from(read_varint(reader).await?)
        .map_err(|_| ServiceError::Protocol("negative frame length".into()))?;
    if len > MAX_FRAME_LEN {
        return Err(ServiceError::Protocol(format!("frame of {len} bytes is too large")));
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    Ok(Bytes::from(buf))
}
