//! Client-visible errors of MDS calls.

use mdsc_types::ClientCode;

/// Legacy numeric codes of application-level failures.
pub mod legacy {
    pub const UNKNOWN: i32 = -2;
    pub const NOTEXIST: i32 = -4;
    pub const INVALIDPARAM: i32 = -7;
}

/// Why an MDS call did not succeed.
///
/// `HostDown` and `Rpc` mean the request never produced a server answer;
/// the remaining variants are the server's verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MdsError {
    /// The channel to the MDS could not be initialized; nothing was sent.
    #[error("mds host down: {addr}")]
    HostDown { addr: String },

    /// Transport-level failure (connect, timeout, protocol).
    #[error("rpc failed, errorcode = {code}, error content: {text}")]
    Rpc { code: i32, text: String },

    #[error("filesystem does not exist")]
    NotExist,

    #[error("invalid parameter")]
    InvalidParam,

    #[error("unknown mds error")]
    Unknown,
}

impl MdsError {
    /// The error as a single negative integer: `-EHOSTDOWN`, the negated
    /// transport code, or a legacy client code.
    pub fn errno(&self) -> i32 {
        match self {
            MdsError::HostDown { .. } => -libc::EHOSTDOWN,
            MdsError::Rpc { code, .. } => -code,
            MdsError::NotExist => legacy::NOTEXIST,
            MdsError::InvalidParam => legacy::INVALIDPARAM,
            MdsError::Unknown => legacy::UNKNOWN,
        }
    }

    /// Whether the server never got to answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, MdsError::HostDown { .. } | MdsError::Rpc { .. })
    }
}

pub type MdsResult<T> = std::result::Result<T, MdsError>;

/// Turn a translated server status into a call result.
pub fn check(code: ClientCode) -> MdsResult<()> {
    match code {
        ClientCode::Ok => Ok(()),
        ClientCode::NotExist => Err(MdsError::NotExist),
        ClientCode::InvalidParam => Err(MdsError::InvalidParam),
        ClientCode::Unknown => Err(MdsError::Unknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check() {
        assert_eq!(check(ClientCode::Ok), Ok(()));
        assert_eq!(check(ClientCode::NotExist), Err(MdsError::NotExist));
        assert_eq!(check(ClientCode::InvalidParam), Err(MdsError::InvalidParam));
        assert_eq!(check(ClientCode::Unknown), Err(MdsError::Unknown));
    }

    #[test]
    fn test_errno() {
        let rpc = MdsError::Rpc {
            code: 111,
            text: "connection refused".into(),
        };
        assert_eq!(rpc.errno(), -111);
        assert!(rpc.is_transport());

        let down = MdsError::HostDown { addr: "x".into() };
        assert_eq!(down.errno(), -libc::EHOSTDOWN);

        assert_eq!(MdsError::NotExist.errno(), legacy::NOTEXIST);
        assert!(!MdsError::InvalidParam.is_transport());
    }

    #[test]
    fn test_display() {
        let rpc = MdsError::Rpc {
            code: 110,
            text: "reached timeout=500ms".into(),
        };
        assert_eq!(
            rpc.to_string(),
            "rpc failed, errorcode = 110, error content: reached timeout=500ms"
        );
        assert_eq!(
            MdsError::HostDown { addr: "mds:1".into() }.to_string(),
            "mds host down: mds:1"
        );
    }
}
