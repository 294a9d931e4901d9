//! Messages exchanged with the metadata server.
//!
//! Value types describing a filesystem (`FsInfo`, `Volume`, `MountPoint`)
//! live in [`types`]; one request/response pair per MDS method lives in
//! [`ops`].

pub mod ops;
pub mod types;

pub use ops::*;
pub use types::*;
