use std::path::PathBuf;

use chrono::{DateTime, Utc};
use skydrop_protocol::ArtifactId;
use skydrop_status::StatusMessage;

use crate::controls::ControlState;
use crate::error::{SessionError, ValidationError};
use crate::limits::Limits;

/// Lifecycle phase of a session.
///
/// `Validating` is transient: it resolves to `Submitting` or back to
/// `Idle` before the controller releases the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Result,
    Deleting,
}

impl Phase {
    /// Whether the upload form is shown.
    pub const fn form_visible(self) -> bool {
        !self.result_visible()
    }

    /// Whether the result view is shown.
    pub const fn result_visible(self) -> bool {
        matches!(self, Phase::Result | Phase::Deleting)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Submitting => "submitting",
            Phase::Result => "result",
            Phase::Deleting => "deleting",
        }
    }
}

/// Why a request was dropped without doing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Limits have not been loaded yet; the submit control is disabled.
    ConfigPending,
    /// The same action is already in flight.
    InFlight,
    /// The form is hidden behind the result view.
    FormHidden,
    /// There is nothing to delete.
    NoActiveArtifact,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Uploaded {
        artifact_id: ArtifactId,
        download_url: String,
        expires_at: Option<DateTime<Utc>>,
    },
    Rejected(ValidationError),
    Failed(SessionError),
    Ignored(IgnoreReason),
}

#[derive(Debug)]
pub enum RevokeOutcome {
    Deleted(ArtifactId),
    Failed(SessionError),
    Ignored(IgnoreReason),
}

/// Notifications for the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    LimitsLoaded(Limits),
    PhaseChanged(Phase),
    Message(StatusMessage),
    MessageCleared,
    /// The delete action was bound. Emitted once per session.
    DeleteListenerAttached,
}

/// Renderable snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub phase: Phase,
    pub form_visible: bool,
    pub result_visible: bool,
    pub selection_summary: String,
    pub selected_count: usize,
    pub retention: String,
    pub max_total_bytes: Option<u64>,
    pub artifact_id: Option<ArtifactId>,
    pub download_url: Option<String>,
    pub qr_path: Option<PathBuf>,
    pub expires_at: Option<DateTime<Utc>>,
    pub submit: ControlState,
    pub delete: ControlState,
    pub message: Option<StatusMessage>,
}
