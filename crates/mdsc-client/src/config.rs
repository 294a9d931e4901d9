//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use mdsc_logging::LogConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where the MDS lives and how long a single call may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdsOption {
    /// `host:port` of the metadata server.
    pub mds_addr: String,

    /// Timeout of one RPC, in milliseconds.
    pub rpc_timeout_ms: u64,
}

impl MdsOption {
    pub fn new(mds_addr: impl Into<String>, rpc_timeout_ms: u64) -> Self {
        Self {
            mds_addr: mds_addr.into(),
            rpc_timeout_ms,
        }
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    /// Reject options that can never produce a successful call. The address
    /// itself is only resolved when a call is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mds_addr.trim().is_empty() {
            return Err(ConfigError::Invalid("mds_addr is empty".into()));
        }
        if self.rpc_timeout_ms == 0 {
            return Err(ConfigError::Invalid("rpc_timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

impl Default for MdsOption {
    fn default() -> Self {
        Self {
            mds_addr: "127.0.0.1:6700".into(),
            rpc_timeout_ms: 500,
        }
    }
}

/// Top-level configuration file of an MDS client process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub mds: MdsOption,
    pub log: LogConfig,
}

impl ClientConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.mds.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(?path, mds_addr = %config.mds.mds_addr, "loaded client config");
        Ok(config)
    }
}
