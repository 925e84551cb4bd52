//! Adapter bridging the HTTP client to the session's `ShareBackend` trait.

use skydrop_client::{Client, Error as ClientError};
use skydrop_protocol::{ArtifactId, Asset, ConfigResponse, SelectedFile, UploadResponse};
use skydrop_session::{BackendError, BackendFuture, ShareBackend};

/// Implements `ShareBackend` by delegating to [`Client`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
}

impl HttpBackend {
    pub fn new(server_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::new(server_url)?,
        })
    }

    pub fn server_url(&self) -> &str {
        self.client.base_url().as_str()
    }
}

fn map_err(e: ClientError) -> BackendError {
    match e {
        ClientError::Api { status, detail } => BackendError::Status { status, detail },
        ClientError::Http(e) if e.is_decode() => BackendError::Malformed(e.to_string()),
        ClientError::Http(e) => BackendError::Transport(e.to_string()),
        ClientError::Json(e) => BackendError::Malformed(e.to_string()),
        ClientError::Io(e) => BackendError::Io(e.to_string()),
        ClientError::InvalidUrl(url) => BackendError::Malformed(format!("invalid URL: {url}")),
    }
}

impl ShareBackend for HttpBackend {
    fn fetch_config(&self) -> BackendFuture<'_, ConfigResponse> {
        Box::pin(async move { self.client.get_config().await.map_err(map_err) })
    }

    fn upload<'a>(
        &'a self,
        files: &'a [SelectedFile],
        retention_hours: u32,
    ) -> BackendFuture<'a, UploadResponse> {
        Box::pin(async move {
            self.client
                .upload(files, retention_hours)
                .await
                .map_err(map_err)
        })
    }

    fn fetch_asset<'a>(&'a self, path: &'a str) -> BackendFuture<'a, Asset> {
        Box::pin(async move { self.client.fetch_asset(path).await.map_err(map_err) })
    }

    fn delete<'a>(&'a self, id: &'a ArtifactId) -> BackendFuture<'a, ()> {
        Box::pin(async move { self.client.delete(id).await.map_err(map_err) })
    }

    fn absolute_url(&self, path: &str) -> String {
        self.client
            .resolve(path)
            .map(String::from)
            .unwrap_or_else(|_| path.to_string())
    }
}
