use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::MIB;

/// Server-issued identifier of an uploaded artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Takes the final path segment of a download link (`/download/<id>`).
    ///
    /// Query strings and fragments are ignored. Returns `None` when the last
    /// segment is empty.
    pub fn from_download_link(link: &str) -> Option<Self> {
        let path = link.split(['?', '#']).next().unwrap_or_default();
        let segment = path.rsplit('/').next().unwrap_or_default();
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file chosen by the user for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Display name, also sent as the multipart filename.
    pub name: String,
    /// Local path the content is streamed from.
    pub path: PathBuf,
    /// Byte size, when the platform reports one.
    pub size: Option<u64>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, size: Option<u64>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            size,
        }
    }

    /// Builds a handle from a path on disk.
    ///
    /// Regular files report their length; pipes, character devices and other
    /// special files have an unknown size. Directories are rejected.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;
        if meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} has no file name", path.display()),
                )
            })?;

        let size = meta.is_file().then(|| meta.len());
        Ok(Self::new(name, path, size))
    }
}

/// Binary resource fetched from the server (the QR image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl Asset {
    /// File extension matching the content type, for local materialization.
    pub fn extension(&self) -> &'static str {
        let mime = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some("image/png") => "png",
            Some("image/jpeg" | "image/jpg") => "jpg",
            Some("image/gif") => "gif",
            Some("image/webp") => "webp",
            Some("image/svg+xml") => "svg",
            _ => "bin",
        }
    }
}

/// Formats a byte limit in MiB: whole numbers without decimals, otherwise
/// with up to two.
pub fn format_mib(bytes: u64) -> String {
    if bytes % MIB == 0 {
        return (bytes / MIB).to_string();
    }
    trim_decimals(format!("{:.2}", bytes as f64 / MIB as f64))
}

/// Human-readable size with binary units (`1.5 MB`, `0 Bytes`).
pub fn format_file_size(bytes: u64, decimals: usize) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 Bytes".into();
    }

    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let number = trim_decimals(format!("{value:.decimals$}"));
    format!("{number} {}", UNITS[unit])
}

fn trim_decimals(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
