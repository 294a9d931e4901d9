//! High-level MDS client.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use mdsc_net::{Channel, Controller};
use mdsc_proto::{
    CreateFsRequest, DeleteFsRequest, FsInfo, FsResponse, GetFsInfoRequest, MountFsRequest,
    MountPoint, UmountFsRequest, Volume,
};
use mdsc_stubs::{MdsBaseClient, RpcMdsBaseClient};
use mdsc_types::{status_name, translate, FsId};

use crate::config::MdsOption;
use crate::error::{check, MdsError, MdsResult};
use crate::executor::RpcExecutor;

/// Filesystem lifecycle operations against the MDS.
///
/// Calls that return filesystem metadata take an output slot; it is
/// overwritten only when the reply actually carries metadata, whatever the
/// status, and is left untouched on transport failure.
#[async_trait]
pub trait MdsClient: Send + Sync {
    async fn create_fs(&self, fs_name: &str, block_size: u64, volume: &Volume) -> MdsResult<()>;

    async fn delete_fs(&self, fs_name: &str) -> MdsResult<()>;

    async fn mount_fs(&self, fs_name: &str, mount_point: &MountPoint, fs_info: &mut FsInfo) -> MdsResult<()>;

    async fn umount_fs(&self, fs_name: &str, mount_point: &MountPoint) -> MdsResult<()>;

    async fn get_fs_info(&self, fs_name: &str, fs_info: &mut FsInfo) -> MdsResult<()>;

    async fn get_fs_info_by_id(&self, fs_id: FsId, fs_info: &mut FsInfo) -> MdsResult<()>;
}

type StubFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// [`MdsClient`] on top of an [`MdsBaseClient`] stub.
pub struct MdsClientImpl {
    executor: RpcExecutor,
    base: Arc<dyn MdsBaseClient>,
}

impl MdsClientImpl {
    pub fn new(option: MdsOption, base: Arc<dyn MdsBaseClient>) -> Self {
        Self {
            executor: RpcExecutor::new(option),
            base,
        }
    }

    /// Client talking to the MDS over the network.
    pub fn with_rpc(option: MdsOption) -> Self {
        Self::new(option, Arc::new(RpcMdsBaseClient))
    }

    pub fn option(&self) -> &MdsOption {
        self.executor.option()
    }

    /// Issue one stub call inside the executor and interpret the outcome.
    ///
    /// `params` renders the request for the warning logged on a non-OK
    /// status.
    async fn run<Rsp, Call, Params>(
        &self,
        op: &'static str,
        params: Params,
        fs_info: Option<&mut FsInfo>,
        call: Call,
    ) -> MdsResult<()>
    where
        Rsp: FsResponse + Send,
        Params: FnOnce() -> String + Send,
        Call: for<'a> FnOnce(&'a dyn MdsBaseClient, &'a mut Controller, &'a Channel) -> StubFuture<'a, Rsp>
            + Send,
    {
        let base = self.base.as_ref();
        self.executor
            .execute(move |channel, mut cntl| async move {
                let mut response = call(base, &mut cntl, &channel).await;
                if cntl.failed() {
                    tracing::warn!(
                        "{} Failed, errorcode = {}, error content: {}, log id = {}",
                        op,
                        cntl.error_code(),
                        cntl.error_text(),
                        cntl.log_id()
                    );
                    return Err(MdsError::Rpc {
                        code: cntl.error_code(),
                        text: cntl.error_text().to_string(),
                    });
                }

                let status = response.status_code();
                let code = translate(status);
                if !code.is_ok() {
                    tracing::warn!(
                        "{}: {}, errcode = {}, errmsg = {}",
                        op,
                        params(),
                        status,
                        status_name(status)
                    );
                }

                if let (Some(out), Some(info)) = (fs_info, response.take_fs_info()) {
                    *out = info;
                }
                check(code)
            })
            .await
    }
}

#[async_trait]
impl MdsClient for MdsClientImpl {
    async fn create_fs(&self, fs_name: &str, block_size: u64, volume: &Volume) -> MdsResult<()> {
        let req = CreateFsRequest {
            fs_name: fs_name.to_string(),
            block_size,
            volume: volume.clone(),
        };
        self.run(
            "CreateFs",
            || format!("fsname = {}, blocksize = {}, volume = {}", fs_name, block_size, volume),
            None,
            move |stub, cntl, channel| stub.create_fs(req, cntl, channel),
        )
        .await
    }

    async fn delete_fs(&self, fs_name: &str) -> MdsResult<()> {
        let req = DeleteFsRequest {
            fs_name: fs_name.to_string(),
        };
        self.run(
            "DeleteFs",
            || format!("fsname = {}", fs_name),
            None,
            move |stub, cntl, channel| stub.delete_fs(req, cntl, channel),
        )
        .await
    }

    async fn mount_fs(&self, fs_name: &str, mount_point: &MountPoint, fs_info: &mut FsInfo) -> MdsResult<()> {
        let req = MountFsRequest {
            fs_name: fs_name.to_string(),
            mount_point: mount_point.clone(),
        };
        self.run(
            "MountFs",
            || format!("fsname = {}, mountPt = {}", fs_name, mount_point),
            Some(fs_info),
            move |stub, cntl, channel| stub.mount_fs(req, cntl, channel),
        )
        .await
    }

    async fn umount_fs(&self, fs_name: &str, mount_point: &MountPoint) -> MdsResult<()> {
        let req = UmountFsRequest {
            fs_name: fs_name.to_string(),
            mount_point: mount_point.clone(),
        };
        self.run(
            "UmountFs",
            || format!("fsname = {}, mountPt = {}", fs_name, mount_point),
            None,
            move |stub, cntl, channel| stub.umount_fs(req, cntl, channel),
        )
        .await
    }

    async fn get_fs_info(&self, fs_name: &str, fs_info: &mut FsInfo) -> MdsResult<()> {
        let req = GetFsInfoRequest::by_name(fs_name);
        self.run(
            "GetFsInfo",
            || format!("fsname = {}", fs_name),
            Some(fs_info),
            move |stub, cntl, channel| stub.get_fs_info(req, cntl, channel),
        )
        .await
    }

    async fn get_fs_info_by_id(&self, fs_id: FsId, fs_info: &mut FsInfo) -> MdsResult<()> {
        let req = GetFsInfoRequest::by_id(fs_id);
        self.run(
            "GetFsInfo",
            || format!("fsid = {}", fs_id),
            Some(fs_info),
            move |stub, cntl, channel| stub.get_fs_info(req, cntl, channel),
        )
        .await
    }
}
