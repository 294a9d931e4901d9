//! The envelope every MDS call runs in.

use std::future::Future;

use mdsc_net::{Channel, Controller};

use crate::config::MdsOption;
use crate::error::{MdsError, MdsResult};

/// Opens a channel and a timed controller for one unit of work.
///
/// The executor holds only the immutable [`MdsOption`]; concurrent calls
/// share nothing else.
#[derive(Debug, Clone)]
pub struct RpcExecutor {
    option: MdsOption,
}

impl RpcExecutor {
    pub fn new(option: MdsOption) -> Self {
        Self { option }
    }

    pub fn option(&self) -> &MdsOption {
        &self.option
    }

    /// Run `task` with a fresh channel and controller and return its result.
    ///
    /// If the channel cannot be initialized the task is not run and
    /// [`MdsError::HostDown`] is returned.
    pub async fn execute<T, F, Fut>(&self, task: F) -> MdsResult<T>
    where
        F: FnOnce(Channel, Controller) -> Fut,
        Fut: Future<Output = MdsResult<T>>,
    {
        let addr = &self.option.mds_addr;
        let channel = match Channel::init(addr).await {
            Ok(channel) => channel,
            Err(e) => {
                tracing::warn!("Init channel failed, addr = {}: {}", addr, e);
                return Err(MdsError::HostDown { addr: addr.clone() });
            }
        };

        let mut cntl = Controller::new();
        cntl.set_timeout(self.option.rpc_timeout());

        task(channel, cntl).await
    }
}
