//! Wire types for the SkyDrop HTTP surface.
//!
//! Shared by the HTTP client and the session controller so that both sides
//! agree on endpoint paths, multipart field names and payload shapes.

pub mod constants;
pub mod messages;
pub mod types;

// Re-export primary types for convenience.
pub use messages::{ConfigResponse, ErrorResponse, UploadResponse, parse_timestamp};
pub use types::{ArtifactId, Asset, SelectedFile, format_file_size, format_mib};

/// Errors produced while interpreting server payloads.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("download link has no artifact id: {0:?}")]
    MissingArtifactId(String),
}
