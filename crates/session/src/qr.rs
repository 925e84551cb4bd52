//! Locally materialized QR image.

use std::io::{self, Write};
use std::path::Path;

use skydrop_protocol::Asset;
use tempfile::NamedTempFile;
use tracing::debug;

/// QR image written to a temporary file for display.
///
/// The file is removed when the value is dropped, which happens when the
/// result is replaced or the session resets.
#[derive(Debug)]
pub struct QrImage {
    file: NamedTempFile,
}

impl QrImage {
    /// Writes the asset bytes to a fresh temporary file.
    pub fn materialize(asset: &Asset) -> io::Result<Self> {
        if asset.bytes.is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "empty QR image"));
        }

        let mut file = tempfile::Builder::new()
            .prefix("skydrop-qr-")
            .suffix(&format!(".{}", asset.extension()))
            .tempfile()?;
        file.write_all(&asset.bytes)?;
        file.flush()?;

        debug!(path = %file.path().display(), len = asset.bytes.len(), "materialized QR image");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Copies the image to a caller-chosen location that outlives the session.
    pub fn save_to(&self, dest: impl AsRef<Path>) -> io::Result<u64> {
        std::fs::copy(self.path(), dest)
    }
}

impl Drop for QrImage {
    fn drop(&mut self) {
        debug!(path = %self.file.path().display(), "releasing QR image");
    }
}
