//! Filesystem description types shared by several MDS messages.

use std::fmt;

use mdsc_types::{FsId, InodeId};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a filesystem on the MDS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FsStatus {
    #[default]
    New,
    Inited,
    Deleting,
}

/// Backing store type of a filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FsType {
    #[default]
    Volume,
    S3,
}

/// Block volume backing a `FsType::Volume` filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Volume {
    pub volume_name: String,
    pub volume_size: u64,
    pub block_size: u64,
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// Used in log lines, so the password is left out.
impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{name: {}, size: {}, block_size: {}, user: {}}}",
            self.volume_name, self.volume_size, self.block_size, self.user
        )
    }
}

/// A client mount of a filesystem: the host and the local directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MountPoint {
    pub host: String,
    pub mount_dir: String,
}

impl MountPoint {
    pub fn new(host: impl Into<String>, mount_dir: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            mount_dir: mount_dir.into(),
        }
    }
}

impl fmt::Display for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.mount_dir)
    }
}

/// Filesystem identity and attributes as recorded by the MDS.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FsInfo {
    pub fs_id: FsId,
    pub fs_name: String,
    #[serde(default)]
    pub status: FsStatus,
    pub root_inode_id: InodeId,
    pub capacity: u64,
    pub block_size: u64,
    #[serde(default)]
    pub mount_num: u32,
    #[serde(default)]
    pub mount_points: Vec<MountPoint>,
    #[serde(default)]
    pub fs_type: FsType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Volume>,
}
