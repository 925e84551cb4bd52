//! Per-session state owned by the controller.

use chrono::{DateTime, Utc};
use skydrop_protocol::{ArtifactId, SelectedFile};

use crate::limits::Limits;
use crate::qr::QrImage;
use crate::types::Phase;

/// Default retention field content.
pub const DEFAULT_RETENTION: &str = "1";

/// What the result view shows after a successful upload.
#[derive(Debug)]
pub struct UploadResult {
    /// Absolute download URL.
    pub download_url: String,
    pub qr: QrImage,
    pub expires_at: Option<DateTime<Utc>>,
}

/// State of one upload/delete session.
///
/// Invariants maintained by the controller:
/// - `artifact` is set iff the phase is `Result` or `Deleting`.
/// - `result` is set iff `artifact` is set.
/// - `limits` is written at most once.
#[derive(Debug)]
pub struct Session {
    pub(crate) files: Vec<SelectedFile>,
    pub(crate) retention: String,
    pub(crate) limits: Option<Limits>,
    pub(crate) phase: Phase,
    pub(crate) artifact: Option<ArtifactId>,
    pub(crate) result: Option<UploadResult>,
    pub(crate) delete_listener_bound: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            retention: DEFAULT_RETENTION.to_string(),
            limits: None,
            phase: Phase::Idle,
            artifact: None,
            result: None,
            delete_listener_bound: false,
        }
    }

    /// Drops the artifact, the result (and its QR file) and the selection.
    /// Retention, limits and the delete binding survive.
    pub(crate) fn reset(&mut self) {
        self.artifact = None;
        self.result = None;
        self.files.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Text describing the current selection.
pub fn selection_summary(files: &[SelectedFile]) -> String {
    match files {
        [] => "No files selected".to_string(),
        [only] => only.name.clone(),
        [first, rest @ ..] => format!("{} and {} more", first.name, rest.len()),
    }
}
