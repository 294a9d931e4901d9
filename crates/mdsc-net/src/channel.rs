use std::net::SocketAddr;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::net::TcpStream;

use crate::controller::Controller;
use crate::error::NetError;
use crate::message::{encode_request, read_frame, write_frame};

/// A handle bound to one MDS address.
///
/// `init` only resolves the address; every [`Channel::call`] opens its own
/// TCP connection and closes it when the reply has been read.
#[derive(Debug, Clone)]
pub struct Channel {
    addr: String,
    socket_addr: SocketAddr,
}

impl Channel {
    /// Resolve `addr` (`host:port`). Fails on malformed or unresolvable input.
    pub async fn init(addr: &str) -> Result<Self, NetError> {
        let invalid = |reason: String| NetError::InvalidAddress {
            addr: addr.to_string(),
            reason,
        };
        let mut resolved = tokio::net::lookup_host(addr)
            .await
            .map_err(|e| invalid(e.to_string()))?;
        let socket_addr = resolved
            .next()
            .ok_or_else(|| invalid("no address resolved".into()))?;
        Ok(Self {
            addr: addr.to_string(),
            socket_addr,
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub fn socket_addr(&self) -> SocketAddr {
        self.socket_addr
    }

    /// Issue one request and decode the reply.
    ///
    /// The whole exchange is bounded by `cntl.timeout()`. On any transport or
    /// decode failure the controller is marked failed and `None` is returned.
    pub async fn call<Req, Rsp>(&self, method: u16, request: &Req, cntl: &mut Controller) -> Option<Rsp>
    where
        Req: Serialize,
        Rsp: DeserializeOwned,
    {
        let timeout = cntl.timeout();
        let exchange = self.round_trip(method, cntl.log_id(), request);
        let result = match tokio::time::timeout(timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(NetError::Timeout(timeout)),
        };

        match result.and_then(|payload| serde_json::from_slice(&payload).map_err(NetError::from)) {
            Ok(rsp) => Some(rsp),
            Err(e) => {
                tracing::debug!(addr = %self.addr, method, log_id = cntl.log_id(), error = %e, "mds call failed");
                cntl.set_failed(e.errno(), e.to_string());
                None
            }
        }
    }

    async fn round_trip<Req: Serialize>(&self, method: u16, log_id: u64, request: &Req) -> Result<Bytes, NetError> {
        let payload = encode_request(method, log_id, request)?;
        let mut stream = TcpStream::connect(self.socket_addr).await?;
        write_frame(&mut stream, &payload).await?;
        read_frame(&mut stream).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::message::decode_request;

    #[tokio::test]
    async fn test_init_accepts_ip_literal() {
        let channel = Channel::init("127.0.0.1:6700").await.unwrap();
        assert_eq!(channel.addr(), "127.0.0.1:6700");
        assert_eq!(channel.socket_addr().port(), 6700);
    }

    #[tokio::test]
    async fn test_init_rejects_malformed_address() {
        for addr in ["", "127.0.0.1", "not an address", "127.0.0.1:notaport"] {
            let err = Channel::init(addr).await.unwrap_err();
            assert!(matches!(err, NetError::InvalidAddress { .. }), "addr {:?}", addr);
        }
    }

    #[tokio::test]
    async fn test_call_round_trip() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let payload = read_frame(&mut stream).await.unwrap();
            let req = decode_request(&payload).unwrap();
            let body: serde_json::Value = serde_json::from_slice(req.body).unwrap();
            let reply = serde_json::json!({ "method": req.method, "log_id": req.log_id, "echo": body });
            write_frame(&mut stream, &serde_json::to_vec(&reply).unwrap()).await.unwrap();
        });

        let channel = Channel::init(&addr).await.unwrap();
        let mut cntl = Controller::new();
        cntl.set_log_id(77);
        let rsp: Option<serde_json::Value> = channel.call(2, &serde_json::json!({"x": 1}), &mut cntl).await;
        assert!(!cntl.failed(), "{}", cntl.error_text());
        let rsp = rsp.unwrap();
        assert_eq!(rsp["method"], 2);
        assert_eq!(rsp["log_id"], 77);
        assert_eq!(rsp["echo"]["x"], 1);
    }

    #[tokio::test]
    async fn test_call_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(stream);
        });

        let channel = Channel::init(&addr).await.unwrap();
        let mut cntl = Controller::new();
        cntl.set_timeout(Duration::from_millis(50));
        let rsp: Option<serde_json::Value> = channel.call(1, &(), &mut cntl).await;
        assert!(rsp.is_none());
        assert!(cntl.failed());
        assert_eq!(cntl.error_code(), libc::ETIMEDOUT);
    }

    #[tokio::test]
    async fn test_call_connection_refused() {
        // Bind then drop to get a local port with nobody listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let channel = Channel::init(&addr).await.unwrap();
        let mut cntl = Controller::new();
        let rsp: Option<serde_json::Value> = channel.call(1, &(), &mut cntl).await;
        assert!(rsp.is_none());
        assert_eq!(cntl.error_code(), libc::ECONNREFUSED);
    }

    #[tokio::test]
    async fn test_call_undecodable_reply() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let _ = read_frame(&mut stream).await.unwrap();
            write_frame(&mut stream, b"not json").await.unwrap();
        });

        let channel = Channel::init(&addr).await.unwrap();
        let mut cntl = Controller::new();
        let rsp: Option<serde_json::Value> = channel.call(1, &(), &mut cntl).await;
        assert!(rsp.is_none());
        assert_eq!(cntl.error_code(), libc::EPROTO);
    }
}
