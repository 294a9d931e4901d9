use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the transport layer.
#[derive(Debug, Error)]
pub enum NetError {
    /// The address could not be parsed or resolved.
    #[error("invalid address `{addr}`: {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("connection refused")]
    ConnectionRefused,

    /// The peer closed the connection before a full frame arrived.
    #[error("connection closed")]
    ConnectionClosed,

    #[error("reached timeout={}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("io error: {0}")]
    Io(io::Error),

    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("invalid message magic: {0:#04x}")]
    InvalidMagic(u8),

    #[error("message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

impl From<io::Error> for NetError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => NetError::ConnectionRefused,
            io::ErrorKind::UnexpectedEof => NetError::ConnectionClosed,
            _ => NetError::Io(err),
        }
    }
}

impl NetError {
    /// Positive errno-style code recorded on the controller.
    pub fn errno(&self) -> i32 {
        match self {
            NetError::InvalidAddress { .. } => libc::EINVAL,
            NetError::ConnectionRefused => libc::ECONNREFUSED,
            NetError::ConnectionClosed => libc::ECONNRESET,
            NetError::Timeout(_) => libc::ETIMEDOUT,
            NetError::Io(err) => match err.kind() {
                io::ErrorKind::TimedOut => libc::ETIMEDOUT,
                io::ErrorKind::ConnectionReset | io::ErrorKind::BrokenPipe => libc::ECONNRESET,
                _ => err.raw_os_error().unwrap_or(libc::EIO),
            },
            NetError::ChecksumMismatch { .. }
            | NetError::InvalidMagic(_)
            | NetError::MessageTooLarge { .. }
            | NetError::MalformedFrame(_)
            | NetError::Codec(_) => libc::EPROTO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_classification() {
        let refused: NetError = io::Error::from(io::ErrorKind::ConnectionRefused).into();
        assert!(matches!(refused, NetError::ConnectionRefused));
        assert_eq!(refused.errno(), 111);

        let eof: NetError = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(matches!(eof, NetError::ConnectionClosed));
        assert_eq!(eof.errno(), libc::ECONNRESET);

        let other: NetError = io::Error::new(io::ErrorKind::Other, "boom").into();
        assert_eq!(other.errno(), libc::EIO);
    }

    #[test]
    fn test_timeout_display_and_errno() {
        let err = NetError::Timeout(Duration::from_millis(500));
        assert_eq!(err.to_string(), "reached timeout=500ms");
        assert_eq!(err.errno(), libc::ETIMEDOUT);
    }

    #[test]
    fn test_protocol_errors_map_to_eproto() {
        assert_eq!(NetError::InvalidMagic(0x12).errno(), libc::EPROTO);
        assert_eq!(NetError::MalformedFrame("short".into()).errno(), libc::EPROTO);
    }
}
