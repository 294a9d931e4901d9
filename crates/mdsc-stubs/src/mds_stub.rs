//! MDS stub trait, its network implementation and a mock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mdsc_net::{Channel, Controller};
use mdsc_proto::{
    CreateFsRequest, CreateFsResponse, DeleteFsRequest, DeleteFsResponse, GetFsInfoRequest,
    GetFsInfoResponse, MdsMethod, MountFsRequest, MountFsResponse, UmountFsRequest,
    UmountFsResponse,
};
use mdsc_types::FsStatusCode;
use parking_lot::Mutex;

/// Lower-level MDS stub.
///
/// Implementations report transport failures through `cntl` (and then return
/// a default response); a well-formed server reply is returned as is, whatever
/// its status code.
#[async_trait]
pub trait MdsBaseClient: Send + Sync {
    async fn create_fs(&self, req: CreateFsRequest, cntl: &mut Controller, channel: &Channel) -> CreateFsResponse;
    async fn delete_fs(&self, req: DeleteFsRequest, cntl: &mut Controller, channel: &Channel) -> DeleteFsResponse;
    async fn mount_fs(&self, req: MountFsRequest, cntl: &mut Controller, channel: &Channel) -> MountFsResponse;
    async fn umount_fs(&self, req: UmountFsRequest, cntl: &mut Controller, channel: &Channel) -> UmountFsResponse;
    async fn get_fs_info(&self, req: GetFsInfoRequest, cntl: &mut Controller, channel: &Channel) -> GetFsInfoResponse;
}

// ---------------------------------------------------------------------------
// Network implementation
// ---------------------------------------------------------------------------

/// Stub that sends each request over the given channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct RpcMdsBaseClient;

#[async_trait]
impl MdsBaseClient for RpcMdsBaseClient {
    async fn create_fs(&self, req: CreateFsRequest, cntl: &mut Controller, channel: &Channel) -> CreateFsResponse {
        channel.call(MdsMethod::CreateFs.into(), &req, cntl).await.unwrap_or_default()
    }

    async fn delete_fs(&self, req: DeleteFsRequest, cntl: &mut Controller, channel: &Channel) -> DeleteFsResponse {
        channel.call(MdsMethod::DeleteFs.into(), &req, cntl).await.unwrap_or_default()
    }

    async fn mount_fs(&self, req: MountFsRequest, cntl: &mut Controller, channel: &Channel) -> MountFsResponse {
        channel.call(MdsMethod::MountFs.into(), &req, cntl).await.unwrap_or_default()
    }

    async fn umount_fs(&self, req: UmountFsRequest, cntl: &mut Controller, channel: &Channel) -> UmountFsResponse {
        channel.call(MdsMethod::UmountFs.into(), &req, cntl).await.unwrap_or_default()
    }

    async fn get_fs_info(&self, req: GetFsInfoRequest, cntl: &mut Controller, channel: &Channel) -> GetFsInfoResponse {
        channel.call(MdsMethod::GetFsInfo.into(), &req, cntl).await.unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Mock implementation
// ---------------------------------------------------------------------------

type Handler<Req, Rsp> = Box<dyn Fn(Req, &mut Controller) -> Rsp + Send + Sync>;

/// A configurable mock for [`MdsBaseClient`].
///
/// Each RPC can be overridden with a closure, which may also mark the
/// controller failed to simulate transport errors. Without a handler the mock
/// answers `OK` with no payload.
pub struct MockMdsBaseClient {
    create_fs_handler: Mutex<Option<Handler<CreateFsRequest, CreateFsResponse>>>,
    delete_fs_handler: Mutex<Option<Handler<DeleteFsRequest, DeleteFsResponse>>>,
    mount_fs_handler: Mutex<Option<Handler<MountFsRequest, MountFsResponse>>>,
    umount_fs_handler: Mutex<Option<Handler<UmountFsRequest, UmountFsResponse>>>,
    get_fs_info_handler: Mutex<Option<Handler<GetFsInfoRequest, GetFsInfoResponse>>>,
    calls: AtomicUsize,
}

impl MockMdsBaseClient {
    pub fn new() -> Self {
        Self {
            create_fs_handler: Mutex::new(None),
            delete_fs_handler: Mutex::new(None),
            mount_fs_handler: Mutex::new(None),
            umount_fs_handler: Mutex::new(None),
            get_fs_info_handler: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of stub methods invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn on_create_fs(
        &self,
        f: impl Fn(CreateFsRequest, &mut Controller) -> CreateFsResponse + Send + Sync + 'static,
    ) {
        *self.create_fs_handler.lock() = Some(Box::new(f));
    }

    pub fn on_delete_fs(
        &self,
        f: impl Fn(DeleteFsRequest, &mut Controller) -> DeleteFsResponse + Send + Sync + 'static,
    ) {
        *self.delete_fs_handler.lock() = Some(Box::new(f));
    }

    pub fn on_mount_fs(
        &self,
        f: impl Fn(MountFsRequest, &mut Controller) -> MountFsResponse + Send + Sync + 'static,
    ) {
        *self.mount_fs_handler.lock() = Some(Box::new(f));
    }

    pub fn on_umount_fs(
        &self,
        f: impl Fn(UmountFsRequest, &mut Controller) -> UmountFsResponse + Send + Sync + 'static,
    ) {
        *self.umount_fs_handler.lock() = Some(Box::new(f));
    }

    pub fn on_get_fs_info(
        &self,
        f: impl Fn(GetFsInfoRequest, &mut Controller) -> GetFsInfoResponse + Send + Sync + 'static,
    ) {
        *self.get_fs_info_handler.lock() = Some(Box::new(f));
    }
}

impl Default for MockMdsBaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MdsBaseClient for MockMdsBaseClient {
    async fn create_fs(&self, req: CreateFsRequest, cntl: &mut Controller, _channel: &Channel) -> CreateFsResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.create_fs_handler.lock().as_ref() {
            Some(f) => f(req, cntl),
            None => CreateFsResponse::new(FsStatusCode::Ok),
        }
    }

    async fn delete_fs(&self, req: DeleteFsRequest, cntl: &mut Controller, _channel: &Channel) -> DeleteFsResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.delete_fs_handler.lock().as_ref() {
            Some(f) => f(req, cntl),
            None => DeleteFsResponse::new(FsStatusCode::Ok),
        }
    }

    async fn mount_fs(&self, req: MountFsRequest, cntl: &mut Controller, _channel: &Channel) -> MountFsResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mount_fs_handler.lock().as_ref() {
            Some(f) => f(req, cntl),
            None => MountFsResponse::new(FsStatusCode::Ok, None),
        }
    }

    async fn umount_fs(&self, req: UmountFsRequest, cntl: &mut Controller, _channel: &Channel) -> UmountFsResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.umount_fs_handler.lock().as_ref() {
            Some(f) => f(req, cntl),
            None => UmountFsResponse::new(FsStatusCode::Ok),
        }
    }

    async fn get_fs_info(&self, req: GetFsInfoRequest, cntl: &mut Controller, _channel: &Channel) -> GetFsInfoResponse {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.get_fs_info_handler.lock().as_ref() {
            Some(f) => f(req, cntl),
            None => GetFsInfoResponse::new(FsStatusCode::Ok, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdsc_proto::{FsResponse, MountPoint};

    async fn channel() -> Channel {
        Channel::init("127.0.0.1:6700").await.unwrap()
    }

    #[tokio::test]
    async fn test_mock_defaults_to_ok() {
        let mock = MockMdsBaseClient::new();
        let ch = channel().await;
        let mut cntl = Controller::new();
        let rsp = mock
            .delete_fs(DeleteFsRequest { fs_name: "fs1".into() }, &mut cntl, &ch)
            .await;
        assert_eq!(rsp.status_code(), FsStatusCode::Ok.raw());
        assert!(!cntl.failed());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_mock_handler_sees_request_and_controller() {
        let mock = MockMdsBaseClient::new();
        mock.on_umount_fs(|req, cntl| {
            assert_eq!(req.mount_point.mount_dir, "/mnt/a");
            cntl.set_failed(104, "reset");
            UmountFsResponse::default()
        });
        let ch = channel().await;
        let mut cntl = Controller::new();
        let req = UmountFsRequest {
            fs_name: "fs1".into(),
            mount_point: MountPoint::new("h", "/mnt/a"),
        };
        let _ = mock.umount_fs(req, &mut cntl, &ch).await;
        assert_eq!(cntl.error_code(), 104);
    }
}
