//! Client-side stubs for the MDS service.
//!
//! [`MdsBaseClient`] is the seam between the MDS client and the wire: one
//! method per RPC, each taking the request, the per-call [`Controller`] and the
//! [`Channel`]. [`RpcMdsBaseClient`] talks to a real server;
//! [`MockMdsBaseClient`] answers from closures for unit tests.
//!
//! [`Controller`]: mdsc_net::Controller
//! [`Channel`]: mdsc_net::Channel

pub mod mds_stub;

pub use mds_stub::{MdsBaseClient, MockMdsBaseClient, RpcMdsBaseClient};
