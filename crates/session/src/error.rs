//! Error types for the session controller.

use skydrop_protocol::format_mib;

/// Reasons a submission is refused before any network use.
///
/// The `Display` text is what the message area shows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select at least one file.")]
    NoFilesSelected,

    #[error("Retention period must be between 1 and 24 hours.")]
    InvalidRetention,

    #[error("Total file size must not exceed {} MB", mib(.limit_bytes))]
    SizeLimitExceeded { total_bytes: u64, limit_bytes: u64 },
}

fn mib(bytes: &u64) -> String {
    format_mib(*bytes)
}

/// Errors returned by a [`ShareBackend`](crate::ShareBackend).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("server returned status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl BackendError {
    /// Server-provided error detail, when the response carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Failure kinds of the session lifecycle. None of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("configuration unavailable: {0}")]
    ConfigUnavailable(BackendError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("upload failed: {0}")]
    UploadFailed(BackendError),

    #[error("QR image unavailable: {0}")]
    AssetFetchFailed(String),

    #[error("delete failed: {0}")]
    DeleteFailed(BackendError),
}
