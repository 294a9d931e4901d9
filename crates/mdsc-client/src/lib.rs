//! Metadata service client.
//!
//! [`MdsClientImpl`] exposes the filesystem lifecycle calls (create, delete,
//! mount, umount, query). Every call runs through the same envelope: the
//! [`RpcExecutor`] opens a channel and a timed controller, the operation's
//! stub call is issued, and the server status is translated into an
//! [`MdsError`]. Nothing is retried; that is left to the caller.

pub mod config;
pub mod error;
pub mod executor;
pub mod mds;

pub use config::{ClientConfig, ConfigError, MdsOption};
pub use error::{MdsError, MdsResult};
pub use executor::RpcExecutor;
pub use mds::{MdsClient, MdsClientImpl};
