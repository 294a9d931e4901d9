//! Request/response messages of the MDS service.

use mdsc_types::{FsId, FsStatusCode};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::types::{FsInfo, MountPoint, Volume};

/// Method id carried in the request frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum MdsMethod {
    CreateFs = 1,
    DeleteFs = 2,
    MountFs = 3,
    UmountFs = 4,
    GetFsInfo = 5,
}

/// Common accessors over MDS responses.
pub trait FsResponse {
    /// Raw server status; see [`mdsc_types::translate`].
    fn status_code(&self) -> i32;

    /// Take the filesystem payload, if the response carries one.
    fn take_fs_info(&mut self) -> Option<FsInfo> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFsRequest {
    pub fs_name: String,
    pub block_size: u64,
    pub volume: Volume,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFsRequest {
    pub fs_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountFsRequest {
    pub fs_name: String,
    pub mount_point: MountPoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmountFsRequest {
    pub fs_name: String,
    pub mount_point: MountPoint,
}

/// Lookup by name or by id; exactly one of the two is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFsInfoRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_id: Option<FsId>,
}

impl GetFsInfoRequest {
    pub fn by_name(fs_name: impl Into<String>) -> Self {
        Self {
            fs_name: Some(fs_name.into()),
            fs_id: None,
        }
    }

    pub fn by_id(fs_id: FsId) -> Self {
        Self {
            fs_name: None,
            fs_id: Some(fs_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateFsResponse {
    pub status_code: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFsResponse {
    pub status_code: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountFsResponse {
    pub status_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_info: Option<FsInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UmountFsResponse {
    pub status_code: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFsInfoResponse {
    pub status_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_info: Option<FsInfo>,
}

macro_rules! status_only_response {
    ($($rsp:ident),*) => {$(
        impl $rsp {
            pub fn new(status: FsStatusCode) -> Self {
                Self { status_code: status.raw() }
            }
        }

        // A response that never arrived reads as an unknown error, never as OK.
        impl Default for $rsp {
            fn default() -> Self {
                Self::new(FsStatusCode::UnknownError)
            }
        }

        impl FsResponse for $rsp {
            fn status_code(&self) -> i32 {
                self.status_code
            }
        }
    )*};
}

macro_rules! fs_info_response {
    ($($rsp:ident),*) => {$(
        impl $rsp {
            pub fn new(status: FsStatusCode, fs_info: Option<FsInfo>) -> Self {
                Self { status_code: status.raw(), fs_info }
            }
        }

        impl Default for $rsp {
            fn default() -> Self {
                Self::new(FsStatusCode::UnknownError, None)
            }
        }

        impl FsResponse for $rsp {
            fn status_code(&self) -> i32 {
                self.status_code
            }

            fn take_fs_info(&mut self) -> Option<FsInfo> {
                self.fs_info.take()
            }
        }
    )*};
}

status_only_response!(CreateFsResponse, DeleteFsResponse, UmountFsResponse);
fs_info_response!(MountFsResponse, GetFsInfoResponse);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_ids() {
        assert_eq!(u16::from(MdsMethod::CreateFs), 1);
        assert_eq!(MdsMethod::try_from(5u16).unwrap(), MdsMethod::GetFsInfo);
        assert!(MdsMethod::try_from(0u16).is_err());
    }

    #[test]
    fn test_default_response_is_not_ok() {
        assert_eq!(CreateFsResponse::default().status_code(), FsStatusCode::UnknownError.raw());
        let mut rsp = GetFsInfoResponse::default();
        assert_ne!(rsp.status_code(), FsStatusCode::Ok.raw());
        assert!(rsp.take_fs_info().is_none());
    }

    #[test]
    fn test_take_fs_info() {
        let info = FsInfo {
            fs_id: FsId(9),
            fs_name: "fs9".into(),
            ..FsInfo::default()
        };
        let mut rsp = MountFsResponse::new(FsStatusCode::Ok, Some(info.clone()));
        assert_eq!(rsp.take_fs_info(), Some(info));
        assert!(rsp.take_fs_info().is_none());
    }

    #[test]
    fn test_get_fs_info_request_shape() {
        let by_name = GetFsInfoRequest::by_name("fs1");
        assert_eq!(serde_json::to_string(&by_name).unwrap(), r#"{"fs_name":"fs1"}"#);
        let by_id = GetFsInfoRequest::by_id(FsId(4));
        assert_eq!(serde_json::to_string(&by_id).unwrap(), r#"{"fs_id":4}"#);
    }

    #[test]
    fn test_response_accepts_unknown_status() {
        let rsp: CreateFsResponse = serde_json::from_str(r#"{"status_code":4242}"#).unwrap();
        assert_eq!(rsp.status_code(), 4242);
    }
}
