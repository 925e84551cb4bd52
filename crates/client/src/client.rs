//! SkyDrop API client.
//!
//! Thin async wrapper over `reqwest`. Server paths are resolved against the
//! configured base URL; absolute URLs returned by the server are used as-is.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use tokio_util::io::ReaderStream;
use tracing::debug;

use skydrop_protocol::constants::{
    CONFIG_PATH, DELETE_PATH_PREFIX, FILES_FIELD, RETENTION_FIELD, UPLOAD_CONTENT_TYPE,
    UPLOAD_PATH,
};
use skydrop_protocol::{
    ArtifactId, Asset, ConfigResponse, ErrorResponse, SelectedFile, UploadResponse,
};

/// Characters escaped when the artifact id is placed in a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

const JSON: &str = "application/json";

/// Errors from the SkyDrop client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// SkyDrop API client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Creates a client for the server at `base_url`.
    ///
    /// No request timeout is configured; requests run until the server
    /// answers or the connection fails.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("skydrop/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_http(http, base_url)
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        let base_url =
            Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    /// Returns the server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a server path (or absolute URL) against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))
    }

    /// Reads the server-declared upload limits.
    pub async fn get_config(&self) -> Result<ConfigResponse, Error> {
        let url = self.resolve(CONFIG_PATH)?;
        debug!(%url, "fetching config");
        let resp = self.http.get(url).header(ACCEPT, JSON).send().await?;
        let body = check_status(resp).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Uploads one or more files in a single multipart request.
    ///
    /// Every file goes under the repeated `uploaded_files` field and is
    /// streamed from disk; the retention period goes in `avail_period`.
    pub async fn upload(
        &self,
        files: &[SelectedFile],
        retention_hours: u32,
    ) -> Result<UploadResponse, Error> {
        let mut form = Form::new();
        for file in files {
            form = form.part(FILES_FIELD, file_part(file).await?);
        }
        form = form.text(RETENTION_FIELD, retention_hours.to_string());

        let url = self.resolve(UPLOAD_PATH)?;
        debug!(%url, files = files.len(), retention_hours, "uploading");
        let resp = self
            .http
            .post(url)
            .header(ACCEPT, JSON)
            .multipart(form)
            .send()
            .await?;
        let body = check_status(resp).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Downloads a binary asset such as the QR image.
    pub async fn fetch_asset(&self, path: &str) -> Result<Asset, Error> {
        let url = self.resolve(path)?;
        debug!(%url, "fetching asset");
        let resp = self.http.get(url).send().await?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = check_status(resp).await?;

        Ok(Asset {
            bytes,
            content_type,
        })
    }

    /// Revokes an uploaded artifact. The response body is ignored on success.
    pub async fn delete(&self, id: &ArtifactId) -> Result<(), Error> {
        let encoded = utf8_percent_encode(id.as_str(), SEGMENT);
        let url = self.resolve(&format!("{DELETE_PATH_PREFIX}/{encoded}"))?;
        debug!(%url, "deleting artifact");
        let resp = self.http.post(url).header(ACCEPT, JSON).send().await?;
        check_status(resp).await?;
        Ok(())
    }
}

/// Builds a streamed multipart part for one file.
async fn file_part(file: &SelectedFile) -> Result<Part, Error> {
    let handle = tokio::fs::File::open(&file.path).await?;
    let meta = handle.metadata().await?;
    let body = reqwest::Body::wrap_stream(ReaderStream::new(handle));

    let part = if meta.is_file() {
        Part::stream_with_length(body, meta.len())
    } else {
        Part::stream(body)
    };

    Ok(part
        .file_name(file.name.clone())
        .mime_str(UPLOAD_CONTENT_TYPE)?)
}

/// Returns the body of a success response, or `Error::Api` with the
/// server-provided `detail` when there is one.
async fn check_status(resp: reqwest::Response) -> Result<Vec<u8>, Error> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.bytes().await.unwrap_or_default();
        let detail = ErrorResponse::parse(&body).message().map(String::from);
        return Err(Error::Api {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(resp.bytes().await?.to_vec())
}
