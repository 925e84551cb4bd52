//! Upload/delete session controller for the SkyDrop client.
//!
//! This crate implements the **business logic** of one client session: it
//! owns the session state and drives the upload/delete lifecycle. It has no
//! UI or transport dependencies; the front end provides a [`ShareBackend`]
//! implementation that bridges to the HTTP client, and renders the
//! [`ViewState`] snapshots the controller produces.
//!
//! # Operations
//!
//! - **Limits** — read the server upload limit once, falling back to 500 MiB
//! - **Validate** — file presence, retention range, aggregate size
//! - **Submit** — multipart upload, QR fetch, result view
//! - **Revoke** — delete the active artifact and reset the session

pub mod backend;
pub mod controller;
pub mod controls;
pub mod error;
pub mod limits;
pub mod qr;
pub mod session;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export primary types for convenience.
pub use backend::{BackendFuture, ShareBackend};
pub use controller::SessionController;
pub use controls::{BusyGuard, Control, ControlState};
pub use error::{BackendError, SessionError, ValidationError};
pub use limits::{LimitSource, Limits, load_limits};
pub use qr::QrImage;
pub use session::{Session, UploadResult, selection_summary};
pub use types::{IgnoreReason, Phase, RevokeOutcome, SessionEvent, SubmitOutcome, ViewState};
pub use validation::validate;
