//! Server upload limit, read once per session.

use skydrop_protocol::constants::DEFAULT_MAX_TOTAL_BYTES;
use tracing::{debug, warn};

use crate::backend::ShareBackend;
use crate::error::SessionError;

/// Where the active limit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitSource {
    Server,
    Default,
}

/// Aggregate upload limit in effect for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_total_bytes: u64,
    pub source: LimitSource,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_total_bytes: DEFAULT_MAX_TOTAL_BYTES,
            source: LimitSource::Default,
        }
    }
}

/// Fetches the server limit. Any failure falls back to the 500 MiB default;
/// the error is logged and never surfaced to the user.
pub async fn load_limits<B: ShareBackend + ?Sized>(backend: &B) -> Limits {
    match backend.fetch_config().await {
        Ok(config) => {
            debug!(max_file_size = config.max_file_size, "loaded server limits");
            Limits {
                max_total_bytes: config.max_file_size,
                source: LimitSource::Server,
            }
        }
        Err(e) => {
            let err = SessionError::ConfigUnavailable(e);
            warn!(
                error = %err,
                default = DEFAULT_MAX_TOTAL_BYTES,
                "using default upload limit"
            );
            Limits::default()
        }
    }
}
