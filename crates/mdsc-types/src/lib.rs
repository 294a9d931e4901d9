//! Shared value types for the MDS client: server status codes, the client
//! code taxonomy they translate into, and strongly-typed identifiers.

#[macro_use]
pub mod strong_type;

pub mod client_code;
pub mod ids;
pub mod status_code;

pub use client_code::{translate, ClientCode};
pub use ids::{FsId, InodeId};
pub use status_code::{status_name, FsStatusCode};
