use std::time::Duration;

/// Endpoint returning server-declared upload limits.
pub const CONFIG_PATH: &str = "/config";

/// Multipart upload endpoint.
pub const UPLOAD_PATH: &str = "/upload";

/// Prefix of the revocation endpoint; the artifact id is appended as one segment.
pub const DELETE_PATH_PREFIX: &str = "/delete";

/// Multipart field carrying each uploaded file (repeated once per file).
pub const FILES_FIELD: &str = "uploaded_files";

/// Multipart field carrying the retention period in hours.
pub const RETENTION_FIELD: &str = "avail_period";

/// One mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// Upload limit used when `/config` cannot be read (500 MiB).
pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 500 * MIB;

/// Shortest retention period accepted by the backend, in hours.
pub const MIN_RETENTION_HOURS: u32 = 1;

/// Longest retention period accepted by the backend, in hours.
pub const MAX_RETENTION_HOURS: u32 = 24;

/// How long a "deleted" confirmation stays in the message area.
pub const SUCCESS_MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Content type sent for every uploaded file part.
pub const UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";
