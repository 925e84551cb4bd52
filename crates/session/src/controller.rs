//! Session controller: drives the upload/delete lifecycle.
//!
//! All methods take `&self` so a front end can keep using the controller
//! (e.g. re-selecting files) while an upload is pending. The session lock is
//! never held across a backend call.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use skydrop_protocol::constants::SUCCESS_MESSAGE_TTL;
use skydrop_protocol::{ArtifactId, SelectedFile};
use skydrop_status::{MessageArea, MessageKind, StatusMessage};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

use crate::backend::ShareBackend;
use crate::controls::Control;
use crate::error::{BackendError, SessionError, ValidationError};
use crate::limits::{Limits, load_limits};
use crate::qr::QrImage;
use crate::session::{Session, UploadResult, selection_summary};
use crate::types::{IgnoreReason, Phase, RevokeOutcome, SessionEvent, SubmitOutcome, ViewState};
use crate::validation::validate;

pub const UPLOAD_FAILED_MESSAGE: &str = "Network or server error.";
pub const BUNDLED_MESSAGE: &str = "Files bundled into a ZIP archive and uploaded.";
pub const DELETED_MESSAGE: &str = "File deleted successfully";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete file";

/// Owns one [`Session`] and the backend it talks to.
pub struct SessionController<B> {
    backend: B,
    session: Arc<Mutex<Session>>,
    messages: Arc<Mutex<MessageArea>>,
    submit: Arc<Control>,
    delete: Arc<Control>,
    delete_attachments: AtomicUsize,
    events_tx: mpsc::Sender<SessionEvent>,
    events_rx: Option<mpsc::Receiver<SessionEvent>>,
}

struct Completed {
    artifact_id: ArtifactId,
    result: UploadResult,
}

/// Moves the session from `in_flight` back to `fallback` when a request
/// future is dropped before it settled the phase itself.
struct PhaseRollback {
    session: Arc<Mutex<Session>>,
    events_tx: mpsc::Sender<SessionEvent>,
    in_flight: Phase,
    fallback: Phase,
    armed: bool,
}

impl PhaseRollback {
    /// The request reached its own outcome; nothing to undo.
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PhaseRollback {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let (in_flight, fallback) = (self.in_flight, self.fallback);
        if let Ok(mut session) = self.session.try_lock() {
            roll_back(&mut session, &self.events_tx, in_flight, fallback);
            return;
        }

        // Lock held elsewhere for a moment: finish once it is released.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!(phase = in_flight.as_str(), "request abandoned outside a runtime");
            return;
        };
        let session = Arc::clone(&self.session);
        let events_tx = self.events_tx.clone();
        handle.spawn(async move {
            let mut session = session.lock().await;
            roll_back(&mut session, &events_tx, in_flight, fallback);
        });
    }
}

fn roll_back(
    session: &mut Session,
    events_tx: &mpsc::Sender<SessionEvent>,
    in_flight: Phase,
    fallback: Phase,
) {
    if session.phase != in_flight {
        return;
    }
    warn!(
        from = in_flight.as_str(),
        to = fallback.as_str(),
        "request abandoned, restoring phase"
    );
    session.phase = fallback;
    let _ = events_tx.try_send(SessionEvent::PhaseChanged(fallback));
}

impl<B: ShareBackend> SessionController<B> {
    /// Creates a controller with limits still pending. The submit control
    /// stays disabled until [`load_config`](Self::load_config) resolves.
    pub fn new(backend: B) -> Self {
        let (events_tx, events_rx) = mpsc::channel(256);
        Self {
            backend,
            session: Arc::new(Mutex::new(Session::new())),
            messages: Arc::new(Mutex::new(MessageArea::new())),
            submit: Arc::new(Control::new(true, false)),
            delete: Arc::new(Control::new(false, true)),
            delete_attachments: AtomicUsize::new(0),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Creates a controller and loads the server limits.
    pub async fn start(backend: B) -> Self {
        let controller = Self::new(backend);
        controller.load_config().await;
        controller
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<SessionEvent>> {
        self.events_rx.take()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Loads the upload limit once per session and enables submission.
    /// Later calls return the limit already in effect.
    pub async fn load_config(&self) -> Limits {
        if let Some(limits) = self.session.lock().await.limits {
            return limits;
        }

        let loaded = load_limits(&self.backend).await;

        let mut session = self.session.lock().await;
        if let Some(limits) = session.limits {
            return limits;
        }
        session.limits = Some(loaded);
        self.submit.set_enabled(true);
        self.emit(SessionEvent::LimitsLoaded(loaded));
        loaded
    }

    /// Replaces the selection. An empty list clears it, except during an
    /// upload where it is ignored. Returns `false` if the change was refused.
    pub async fn select_files(&self, files: Vec<SelectedFile>) -> bool {
        let mut session = self.session.lock().await;
        if !session.phase.form_visible() {
            debug!(phase = session.phase.as_str(), "selection refused, form hidden");
            return false;
        }
        if files.is_empty() && session.phase == Phase::Submitting {
            return false;
        }
        debug!(count = files.len(), "files selected");
        session.files = files;
        true
    }

    /// Drag-and-drop entry: an empty drop is ignored.
    pub async fn drop_files(&self, files: Vec<SelectedFile>) -> bool {
        if files.is_empty() {
            return false;
        }
        self.select_files(files).await
    }

    /// Sets the raw retention field content.
    pub async fn set_retention(&self, raw: impl Into<String>) {
        self.session.lock().await.retention = raw.into();
    }

    /// Checks the current selection without side effects.
    pub async fn validate(&self) -> Result<u32, ValidationError> {
        let session = self.session.lock().await;
        validate(
            &session.files,
            &session.retention,
            session.limits.unwrap_or_default(),
        )
    }

    /// Validates and uploads the current selection, then fetches its QR
    /// image and switches to the result view.
    pub async fn submit(&self) -> SubmitOutcome {
        let (files, hours, busy, rollback) = {
            let mut session = self.session.lock().await;
            let Some(limits) = session.limits else {
                return SubmitOutcome::Ignored(IgnoreReason::ConfigPending);
            };
            if !session.phase.form_visible() {
                return SubmitOutcome::Ignored(IgnoreReason::FormHidden);
            }
            if session.phase == Phase::Submitting {
                return SubmitOutcome::Ignored(IgnoreReason::InFlight);
            }

            self.clear_message().await;
            self.set_phase(&mut session, Phase::Validating);

            let hours = match validate(&session.files, &session.retention, limits) {
                Ok(hours) => hours,
                Err(e) => {
                    debug!(error = %e, "submission rejected");
                    self.set_phase(&mut session, Phase::Idle);
                    self.show(MessageKind::Error, e.to_string()).await;
                    return SubmitOutcome::Rejected(e);
                }
            };

            let Some(busy) = self.submit.try_acquire() else {
                self.set_phase(&mut session, Phase::Idle);
                return SubmitOutcome::Ignored(IgnoreReason::InFlight);
            };
            self.set_phase(&mut session, Phase::Submitting);
            let rollback = self.rollback(Phase::Submitting, Phase::Idle);
            (session.files.clone(), hours, busy, rollback)
        };

        let outcome = match self.execute(&files, hours).await {
            Ok(Completed {
                artifact_id,
                result,
            }) => {
                let download_url = result.download_url.clone();
                let expires_at = result.expires_at;

                let mut session = self.session.lock().await;
                session.artifact = Some(artifact_id.clone());
                session.result = Some(result);
                self.set_phase(&mut session, Phase::Result);
                self.delete.set_visible(true);
                self.attach_delete_listener(&mut session);
                self.show(MessageKind::Success, upload_message(&files)).await;

                info!(
                    artifact = %artifact_id,
                    files = files.len(),
                    retention_hours = hours,
                    "upload complete"
                );
                SubmitOutcome::Uploaded {
                    artifact_id,
                    download_url,
                    expires_at,
                }
            }
            Err(e) => {
                warn!(error = %e, "upload failed");
                let mut session = self.session.lock().await;
                self.set_phase(&mut session, Phase::Idle);
                self.show(MessageKind::Error, UPLOAD_FAILED_MESSAGE).await;
                SubmitOutcome::Failed(e)
            }
        };

        rollback.disarm();
        drop(busy);
        outcome
    }

    /// Deletes the active artifact. On success the session resets to the
    /// form; on failure the result view stays as it was.
    pub async fn revoke(&self) -> RevokeOutcome {
        let (id, busy, rollback) = {
            let mut session = self.session.lock().await;
            let Some(id) = session.artifact.clone() else {
                warn!("no active artifact to delete");
                return RevokeOutcome::Ignored(IgnoreReason::NoActiveArtifact);
            };
            if session.phase != Phase::Result {
                return RevokeOutcome::Ignored(IgnoreReason::InFlight);
            }
            let Some(busy) = self.delete.try_acquire() else {
                return RevokeOutcome::Ignored(IgnoreReason::InFlight);
            };
            self.set_phase(&mut session, Phase::Deleting);
            (id, busy, self.rollback(Phase::Deleting, Phase::Result))
        };

        let outcome = match self.backend.delete(&id).await {
            Ok(()) => {
                let mut session = self.session.lock().await;
                session.reset();
                self.delete.set_visible(false);
                self.set_phase(&mut session, Phase::Idle);
                self.show(MessageKind::Success, DELETED_MESSAGE).await;
                self.schedule_clear(DELETED_MESSAGE);

                info!(artifact = %id, "artifact deleted");
                RevokeOutcome::Deleted(id)
            }
            Err(e) => {
                warn!(artifact = %id, error = %e, "delete failed");
                let text = e.detail().unwrap_or(DELETE_FAILED_MESSAGE).to_string();
                let mut session = self.session.lock().await;
                self.set_phase(&mut session, Phase::Result);
                self.show(MessageKind::Error, text).await;
                RevokeOutcome::Failed(SessionError::DeleteFailed(e))
            }
        };

        rollback.disarm();
        drop(busy);
        outcome
    }

    pub async fn phase(&self) -> Phase {
        self.session.lock().await.phase
    }

    pub async fn active_artifact(&self) -> Option<ArtifactId> {
        self.session.lock().await.artifact.clone()
    }

    pub async fn limits(&self) -> Option<Limits> {
        self.session.lock().await.limits
    }

    pub async fn message(&self) -> Option<StatusMessage> {
        self.messages.lock().await.current().cloned()
    }

    /// How many times the delete action has been bound.
    pub fn delete_listener_attachments(&self) -> usize {
        self.delete_attachments.load(Ordering::Acquire)
    }

    /// Snapshot for rendering.
    pub async fn view(&self) -> ViewState {
        let session = self.session.lock().await;
        let message = self.messages.lock().await.current().cloned();
        let result = session.result.as_ref();

        ViewState {
            phase: session.phase,
            form_visible: session.phase.form_visible(),
            result_visible: session.phase.result_visible(),
            selection_summary: selection_summary(&session.files),
            selected_count: session.files.len(),
            retention: session.retention.clone(),
            max_total_bytes: session.limits.map(|l| l.max_total_bytes),
            artifact_id: session.artifact.clone(),
            download_url: result.map(|r| r.download_url.clone()),
            qr_path: result.map(|r| r.qr.path().to_path_buf()),
            expires_at: result.and_then(|r| r.expires_at),
            submit: self.submit.state(),
            delete: self.delete.state(),
            message,
        }
    }

    /// Copies the current QR image to `dest`.
    pub async fn save_qr(&self, dest: &Path) -> io::Result<Option<u64>> {
        let session = self.session.lock().await;
        match session.result.as_ref() {
            Some(result) => result.qr.save_to(dest).map(Some),
            None => Ok(None),
        }
    }

    async fn execute(&self, files: &[SelectedFile], hours: u32) -> Result<Completed, SessionError> {
        let response = self
            .backend
            .upload(files, hours)
            .await
            .map_err(SessionError::UploadFailed)?;

        let artifact_id = response
            .artifact_id()
            .map_err(|e| SessionError::UploadFailed(BackendError::Malformed(e.to_string())))?;

        let asset = self
            .backend
            .fetch_asset(&response.qr_code)
            .await
            .map_err(|e| SessionError::AssetFetchFailed(e.to_string()))?;
        let qr = QrImage::materialize(&asset).map_err(|e| {
            warn!(artifact = %artifact_id, error = %e, "QR image unusable");
            SessionError::AssetFetchFailed(e.to_string())
        })?;

        Ok(Completed {
            result: UploadResult {
                download_url: self.backend.absolute_url(&response.download_link),
                qr,
                expires_at: response.expired_at,
            },
            artifact_id,
        })
    }

    fn rollback(&self, in_flight: Phase, fallback: Phase) -> PhaseRollback {
        PhaseRollback {
            session: Arc::clone(&self.session),
            events_tx: self.events_tx.clone(),
            in_flight,
            fallback,
            armed: true,
        }
    }

    /// Binds the delete action the first time a result is shown.
    fn attach_delete_listener(&self, session: &mut Session) {
        if session.delete_listener_bound {
            return;
        }
        session.delete_listener_bound = true;
        self.delete_attachments.fetch_add(1, Ordering::AcqRel);
        self.emit(SessionEvent::DeleteListenerAttached);
    }

    fn set_phase(&self, session: &mut Session, phase: Phase) {
        if session.phase != phase {
            debug!(from = session.phase.as_str(), to = phase.as_str(), "phase change");
            session.phase = phase;
            self.emit(SessionEvent::PhaseChanged(phase));
        }
    }

    async fn show(&self, kind: MessageKind, text: impl Into<String>) {
        let mut messages = self.messages.lock().await;
        messages.show(kind, text);
        if let Some(msg) = messages.current() {
            self.emit(SessionEvent::Message(msg.clone()));
        }
    }

    async fn clear_message(&self) {
        let mut messages = self.messages.lock().await;
        if !messages.is_empty() {
            messages.clear();
            self.emit(SessionEvent::MessageCleared);
        }
    }

    /// Clears `text` after the TTL unless another message replaced it.
    fn schedule_clear(&self, text: &'static str) {
        let messages = Arc::clone(&self.messages);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(SUCCESS_MESSAGE_TTL).await;
            if messages.lock().await.clear_if_showing(text) {
                let _ = events_tx.try_send(SessionEvent::MessageCleared);
            }
        });
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening, or a full channel: the view snapshot stays authoritative.
        let _ = self.events_tx.try_send(event);
    }
}

fn upload_message(files: &[SelectedFile]) -> String {
    match files {
        [only] => format!("File \"{}\" uploaded successfully.", only.name),
        _ => BUNDLED_MESSAGE.to_string(),
    }
}
