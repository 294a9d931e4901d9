//! Status codes reported by the metadata server.

use std::borrow::Cow;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

/// Server-side status of an MDS request.
///
/// Responses carry the raw `i32` so that codes added by newer servers still
/// decode; use [`FsStatusCode::from_raw`] to recognise known values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(i32)]
pub enum FsStatusCode {
    Ok = 0,
    UnknownError = 1,
    FsExist = 2,
    NotFound = 3,
    ParamError = 4,
    MountPointExist = 5,
    MountPointNotExist = 6,
    RpcError = 7,
    InitSpaceError = 8,
    UninitSpaceError = 9,
    FsBusy = 10,
    InsertRootInodeError = 11,
    DeleteRootInodeError = 12,
    StorageError = 13,
    AllocFsIdError = 14,
}

impl FsStatusCode {
    /// Every known status code, in wire order.
    pub const ALL: [FsStatusCode; 15] = [
        FsStatusCode::Ok,
        FsStatusCode::UnknownError,
        FsStatusCode::FsExist,
        FsStatusCode::NotFound,
        FsStatusCode::ParamError,
        FsStatusCode::MountPointExist,
        FsStatusCode::MountPointNotExist,
        FsStatusCode::RpcError,
        FsStatusCode::InitSpaceError,
        FsStatusCode::UninitSpaceError,
        FsStatusCode::FsBusy,
        FsStatusCode::InsertRootInodeError,
        FsStatusCode::DeleteRootInodeError,
        FsStatusCode::StorageError,
        FsStatusCode::AllocFsIdError,
    ];

    /// Decode a raw wire value; `None` for codes this client does not know.
    pub fn from_raw(raw: i32) -> Option<Self> {
        Self::try_from(raw).ok()
    }

    pub fn raw(self) -> i32 {
        self.into()
    }

    /// Canonical upper-case name, as used in server logs.
    pub fn name(self) -> &'static str {
        match self {
            FsStatusCode::Ok => "OK",
            FsStatusCode::UnknownError => "UNKNOWN_ERROR",
            FsStatusCode::FsExist => "FS_EXIST",
            FsStatusCode::NotFound => "NOT_FOUND",
            FsStatusCode::ParamError => "PARAM_ERROR",
            FsStatusCode::MountPointExist => "MOUNT_POINT_EXIST",
            FsStatusCode::MountPointNotExist => "MOUNT_POINT_NOT_EXIST",
            FsStatusCode::RpcError => "RPC_ERROR",
            FsStatusCode::InitSpaceError => "INIT_SPACE_ERROR",
            FsStatusCode::UninitSpaceError => "UNINIT_SPACE_ERROR",
            FsStatusCode::FsBusy => "FS_BUSY",
            FsStatusCode::InsertRootInodeError => "INSERT_ROOT_INODE_ERROR",
            FsStatusCode::DeleteRootInodeError => "DELETE_ROOT_INODE_ERROR",
            FsStatusCode::StorageError => "STORAGE_ERROR",
            FsStatusCode::AllocFsIdError => "ALLOC_FS_ID_ERROR",
        }
    }
}

/// Human-readable name of a raw status, e.g. `NOT_FOUND` or `UNKNOWN(42)`.
pub fn status_name(raw: i32) -> Cow<'static, str> {
    match FsStatusCode::from_raw(raw) {
        Some(code) => Cow::Borrowed(code.name()),
        None => Cow::Owned(format!("UNKNOWN({})", raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values_are_stable() {
        assert_eq!(FsStatusCode::Ok.raw(), 0);
        assert_eq!(FsStatusCode::NotFound.raw(), 3);
        assert_eq!(FsStatusCode::ParamError.raw(), 4);
    }

    #[test]
    fn test_from_raw() {
        for code in FsStatusCode::ALL {
            assert_eq!(FsStatusCode::from_raw(code.raw()), Some(code));
        }
        assert_eq!(FsStatusCode::from_raw(-1), None);
        assert_eq!(FsStatusCode::from_raw(1000), None);
    }

    #[test]
    fn test_status_name() {
        assert_eq!(status_name(0), "OK");
        assert_eq!(status_name(3), "NOT_FOUND");
        assert_eq!(status_name(4), "PARAM_ERROR");
        assert_eq!(status_name(77), "UNKNOWN(77)");
    }
}
