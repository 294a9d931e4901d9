//! Frame layout shared by MDS clients and servers.
//!
//! ```text
//! frame   = [checksum: u32 LE][size: u32 LE][payload: size bytes]
//! request = [method: u16 LE][log_id: u64 LE][json body]
//! reply   = [json body]
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::NetError;

pub const MESSAGE_HEADER_SIZE: usize = 8;

/// Low byte of every checksum.
pub const MESSAGE_MAGIC_NUM: u8 = 0x86;

pub const MESSAGE_MAX_SIZE: usize = 16 * 1024 * 1024;

const REQUEST_PREFIX_SIZE: usize = 2 + 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageHeader {
    pub checksum: u32,
    pub size: u32,
}

impl MessageHeader {
    pub fn for_payload(payload: &[u8]) -> Self {
        Self {
            checksum: checksum(payload),
            size: payload.len() as u32,
        }
    }

    pub fn from_bytes(data: &[u8; MESSAGE_HEADER_SIZE]) -> Self {
        let checksum = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        Self { checksum, size }
    }

    pub fn to_bytes(&self) -> [u8; MESSAGE_HEADER_SIZE] {
        let mut buf = [0u8; MESSAGE_HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.checksum.to_le_bytes());
        buf[4..8].copy_from_slice(&self.size.to_le_bytes());
        buf
    }

    /// Check the magic byte and the declared size, before the payload is read.
    fn check_shape(&self) -> Result<(), NetError> {
        let magic = (self.checksum & 0xff) as u8;
        if magic != MESSAGE_MAGIC_NUM {
            return Err(NetError::InvalidMagic(magic));
        }
        let size = self.size as usize;
        if size > MESSAGE_MAX_SIZE {
            return Err(NetError::MessageTooLarge {
                size,
                max: MESSAGE_MAX_SIZE,
            });
        }
        Ok(())
    }

    pub fn validate(&self, payload: &[u8]) -> Result<(), NetError> {
        self.check_shape()?;
        let expected = checksum(payload);
        if self.checksum != expected {
            return Err(NetError::ChecksumMismatch {
                expected,
                actual: self.checksum,
            });
        }
        Ok(())
    }
}

/// CRC32C of the payload with the magic number in the low byte.
pub fn checksum(payload: &[u8]) -> u32 {
    (crc32c::crc32c(payload) & !0xff) | MESSAGE_MAGIC_NUM as u32
}

pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), NetError>
where
    W: AsyncWrite + Unpin,
{
    if payload.len() > MESSAGE_MAX_SIZE {
        return Err(NetError::MessageTooLarge {
            size: payload.len(),
            max: MESSAGE_MAX_SIZE,
        });
    }
    let header = MessageHeader::for_payload(payload);
    let mut frame = BytesMut::with_capacity(MESSAGE_HEADER_SIZE + payload.len());
    frame.extend_from_slice(&header.to_bytes());
    frame.extend_from_slice(payload);
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one frame and return its verified payload.
pub async fn read_frame<R>(reader: &mut R) -> Result<Bytes, NetError>
where
    R: AsyncRead + Unpin,
{
    let mut header_bytes = [0u8; MESSAGE_HEADER_SIZE];
    reader.read_exact(&mut header_bytes).await?;
    let header = MessageHeader::from_bytes(&header_bytes);
    header.check_shape()?;

    let mut payload = vec![0u8; header.size as usize];
    reader.read_exact(&mut payload).await?;
    header.validate(&payload)?;
    Ok(Bytes::from(payload))
}

/// Build a request payload (not yet framed).
pub fn encode_request<T: Serialize>(method: u16, log_id: u64, body: &T) -> Result<Bytes, NetError> {
    let json = serde_json::to_vec(body)?;
    let mut buf = BytesMut::with_capacity(REQUEST_PREFIX_SIZE + json.len());
    buf.put_u16_le(method);
    buf.put_u64_le(log_id);
    buf.extend_from_slice(&json);
    Ok(buf.freeze())
}

/// A decoded request payload; `body` is still JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestFrame<'a> {
    pub method: u16,
    pub log_id: u64,
    pub body: &'a [u8],
}

pub fn decode_request(payload: &[u8]) -> Result<RequestFrame<'_>, NetError> {
    if payload.len() < REQUEST_PREFIX_SIZE {
        return Err(NetError::MalformedFrame(format!(
            "request prefix needs {} bytes, have {}",
            REQUEST_PREFIX_SIZE,
            payload.len()
        )));
    }
    let method = u16::from_le_bytes([payload[0], payload[1]]);
    let mut log_id = [0u8; 8];
    log_id.copy_from_slice(&payload[2..REQUEST_PREFIX_SIZE]);
    Ok(RequestFrame {
        method,
        log_id: u64::from_le_bytes(log_id),
        body: &payload[REQUEST_PREFIX_SIZE..],
    })
}
