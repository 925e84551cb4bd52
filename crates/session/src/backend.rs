//! Backend trait the controller talks through.

use std::future::Future;
use std::pin::Pin;

use skydrop_protocol::{ArtifactId, Asset, ConfigResponse, SelectedFile, UploadResponse};

use crate::error::BackendError;

/// Boxed future returned by [`ShareBackend`] methods.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'a>>;

/// Abstract connection to the SkyDrop server.
///
/// The front end implements this on top of the HTTP client. Keeping the
/// controller behind a trait makes the lifecycle testable with mocks.
pub trait ShareBackend: Send + Sync {
    /// `GET /config`.
    fn fetch_config(&self) -> BackendFuture<'_, ConfigResponse>;

    /// `POST /upload` with every file and the retention period.
    fn upload<'a>(
        &'a self,
        files: &'a [SelectedFile],
        retention_hours: u32,
    ) -> BackendFuture<'a, UploadResponse>;

    /// Fetches a binary asset (the QR image) by server path.
    fn fetch_asset<'a>(&'a self, path: &'a str) -> BackendFuture<'a, Asset>;

    /// `POST /delete/{id}`.
    fn delete<'a>(&'a self, id: &'a ArtifactId) -> BackendFuture<'a, ()>;

    /// Turns a server path into an absolute URL for display.
    fn absolute_url(&self, path: &str) -> String;
}
