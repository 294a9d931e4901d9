//! Translation of server status codes into the client error taxonomy.

use std::fmt;

use crate::status_code::FsStatusCode;

/// Outcome of an MDS request as seen by the filesystem client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientCode {
    Ok,
    NotExist,
    InvalidParam,
    Unknown,
}

impl ClientCode {
    pub fn is_ok(self) -> bool {
        self == ClientCode::Ok
    }

    pub fn name(self) -> &'static str {
        match self {
            ClientCode::Ok => "OK",
            ClientCode::NotExist => "NOTEXIST",
            ClientCode::InvalidParam => "INVALIDPARAM",
            ClientCode::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ClientCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<FsStatusCode> for ClientCode {
    fn from(code: FsStatusCode) -> Self {
        // No wildcard arm: a new server code must be classified here.
        match code {
            FsStatusCode::Ok => ClientCode::Ok,
            FsStatusCode::NotFound => ClientCode::NotExist,
            FsStatusCode::ParamError => ClientCode::InvalidParam,
            FsStatusCode::UnknownError
            | FsStatusCode::FsExist
            | FsStatusCode::MountPointExist
            | FsStatusCode::MountPointNotExist
            | FsStatusCode::RpcError
            | FsStatusCode::InitSpaceError
            | FsStatusCode::UninitSpaceError
            | FsStatusCode::FsBusy
            | FsStatusCode::InsertRootInodeError
            | FsStatusCode::DeleteRootInodeError
            | FsStatusCode::StorageError
            | FsStatusCode::AllocFsIdError => ClientCode::Unknown,
        }
    }
}

/// Map a raw server status to a client code. Total: values outside the
/// known enumeration become [`ClientCode::Unknown`].
pub fn translate(raw: i32) -> ClientCode {
    FsStatusCode::from_raw(raw).map_or(ClientCode::Unknown, ClientCode::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_documented_codes() {
        assert_eq!(translate(FsStatusCode::Ok.raw()), ClientCode::Ok);
        assert_eq!(translate(FsStatusCode::NotFound.raw()), ClientCode::NotExist);
        assert_eq!(translate(FsStatusCode::ParamError.raw()), ClientCode::InvalidParam);
    }

    #[test]
    fn test_translate_every_other_known_code_is_unknown() {
        for code in FsStatusCode::ALL {
            let expected = match code {
                FsStatusCode::Ok => ClientCode::Ok,
                FsStatusCode::NotFound => ClientCode::NotExist,
                FsStatusCode::ParamError => ClientCode::InvalidParam,
                _ => ClientCode::Unknown,
            };
            assert_eq!(translate(code.raw()), expected, "code {}", code.name());
        }
    }

    #[test]
    fn test_translate_unrecognized_codes() {
        for raw in [-100, -1, 15, 999, i32::MAX, i32::MIN] {
            assert_eq!(translate(raw), ClientCode::Unknown, "raw {}", raw);
        }
    }

    #[test]
    fn test_client_code_display() {
        assert!(ClientCode::Ok.is_ok());
        assert!(!ClientCode::NotExist.is_ok());
        assert_eq!(ClientCode::InvalidParam.to_string(), "INVALIDPARAM");
    }
}
