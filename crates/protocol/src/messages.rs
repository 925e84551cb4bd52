//! JSON payloads exchanged with the backend.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ProtocolError;
use crate::types::ArtifactId;

/// Response of `GET /config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResponse {
    /// Maximum total upload size in bytes.
    pub max_file_size: u64,
}

/// Response of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Server-relative download path, e.g. `/download/<id>`.
    pub download_link: String,
    /// Server-relative path of the QR image, e.g. `/qr/<id>`.
    pub qr_code: String,
    /// When the backend will expire the artifact.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub expired_at: Option<DateTime<Utc>>,
}

/// Expiry is informational: an unreadable value decodes as `None` instead of
/// failing the whole response.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

/// Parses an RFC 3339 timestamp, or a naive ISO 8601 one taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|n| n.and_utc())
        })
}

impl UploadResponse {
    /// Extracts the artifact id from the download link.
    pub fn artifact_id(&self) -> Result<ArtifactId, ProtocolError> {
        ArtifactId::from_download_link(&self.download_link)
            .ok_or_else(|| ProtocolError::MissingArtifactId(self.download_link.clone()))
    }
}

/// Error body returned by the backend on non-success statuses.
///
/// FastAPI puts a string in `detail` for explicit `HTTPException`s and a list
/// of objects for request validation failures, so the field is kept loose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Parses an error body, returning the default (no detail) on garbage.
    pub fn parse(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Returns the detail text when the server sent a plain string.
    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|d| d.as_str())
            .filter(|s| !s.is_empty())
    }
}
