//! Client-side transport for MDS calls.
//!
//! A [`Channel`] is bound to one server address and opens a fresh TCP
//! connection per call. Each call is driven by a [`Controller`], which
//! carries the timeout in and the failure state out.

pub mod channel;
pub mod controller;
pub mod error;
pub mod message;

pub use channel::Channel;
pub use controller::Controller;
pub use error::NetError;
pub use message::{decode_request, encode_request, read_frame, write_frame, MessageHeader, RequestFrame};
