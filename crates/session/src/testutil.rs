use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use skydrop_protocol::constants::MIB;
use skydrop_protocol::{ArtifactId, Asset, ConfigResponse, SelectedFile, UploadResponse};
use tokio::sync::Semaphore;

use crate::backend::{BackendFuture, ShareBackend};
use crate::error::BackendError;

pub(crate) const BASE: &str = "http://share.test";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Config,
    Upload {
        files: Vec<String>,
        retention_hours: u32,
    },
    Asset(String),
    Delete(String),
}

/// Scripted backend: each method pops the next queued response and records
/// the call. An empty queue answers with a transport error.
#[derive(Default)]
pub(crate) struct MockBackend {
    config: Mutex<VecDeque<Result<ConfigResponse, BackendError>>>,
    uploads: Mutex<VecDeque<Result<UploadResponse, BackendError>>>,
    assets: Mutex<VecDeque<Result<Asset, BackendError>>>,
    deletes: Mutex<VecDeque<Result<(), BackendError>>>,
    calls: Mutex<Vec<Call>>,
    upload_gate: Option<Arc<Semaphore>>,
    delete_gate: Option<Arc<Semaphore>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads wait for a permit on `gate` before answering.
    pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
        self.upload_gate = Some(gate);
        self
    }

    /// Deletes wait for a permit on `gate` before answering.
    pub fn gated_deletes(mut self, gate: Arc<Semaphore>) -> Self {
        self.delete_gate = Some(gate);
        self
    }

    pub fn push_config(&self, r: Result<ConfigResponse, BackendError>) {
        self.config.lock().unwrap().push_back(r);
    }

    pub fn push_upload(&self, r: Result<UploadResponse, BackendError>) {
        self.uploads.lock().unwrap().push_back(r);
    }

    pub fn push_asset(&self, r: Result<Asset, BackendError>) {
        self.assets.lock().unwrap().push_back(r);
    }

    pub fn push_delete(&self, r: Result<(), BackendError>) {
        self.deletes.lock().unwrap().push_back(r);
    }

    /// Queues a full successful upload (response plus QR image).
    pub fn push_share(&self, id: &str) {
        self.push_upload(Ok(upload_response(id)));
        self.push_asset(Ok(png()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn upload_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Upload { .. }))
    }

    pub fn delete_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Delete(_)))
    }

    fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| f(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, BackendError>>>) -> Result<T, BackendError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(BackendError::Transport("no scripted response".into())))
}

impl ShareBackend for MockBackend {
    fn fetch_config(&self) -> BackendFuture<'_, ConfigResponse> {
        self.record(Call::Config);
        Box::pin(async move { pop(&self.config) })
    }

    fn upload<'a>(
        &'a self,
        files: &'a [SelectedFile],
        retention_hours: u32,
    ) -> BackendFuture<'a, UploadResponse> {
        self.record(Call::Upload {
            files: files.iter().map(|f| f.name.clone()).collect(),
            retention_hours,
        });
        Box::pin(async move {
            if let Some(gate) = &self.upload_gate {
                let _permit = gate.acquire().await;
            }
            pop(&self.uploads)
        })
    }

    fn fetch_asset<'a>(&'a self, path: &'a str) -> BackendFuture<'a, Asset> {
        self.record(Call::Asset(path.to_string()));
        Box::pin(async move { pop(&self.assets) })
    }

    fn delete<'a>(&'a self, id: &'a ArtifactId) -> BackendFuture<'a, ()> {
        self.record(Call::Delete(id.to_string()));
        Box::pin(async move {
            if let Some(gate) = &self.delete_gate {
                let _permit = gate.acquire().await;
            }
            pop(&self.deletes)
        })
    }

    fn absolute_url(&self, path: &str) -> String {
        format!("{BASE}{path}")
    }
}

pub(crate) fn config(max_mib: u64) -> Result<ConfigResponse, BackendError> {
    Ok(ConfigResponse {
        max_file_size: max_mib * MIB,
    })
}

pub(crate) fn upload_response(id: &str) -> UploadResponse {
    UploadResponse {
        download_link: format!("/download/{id}"),
        qr_code: format!("/qr/{id}"),
        expired_at: None,
    }
}

pub(crate) fn png() -> Asset {
    Asset {
        bytes: b"\x89PNG\r\n\x1a\nqr".to_vec(),
        content_type: Some("image/png".into()),
    }
}

pub(crate) fn file(name: &str, size_mib: u64) -> SelectedFile {
    SelectedFile::new(name, format!("/tmp/{name}"), Some(size_mib * MIB))
}
