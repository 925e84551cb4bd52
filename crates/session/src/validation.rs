//! Pre-submission checks.

use skydrop_protocol::SelectedFile;
use skydrop_protocol::constants::{MAX_RETENTION_HOURS, MIN_RETENTION_HOURS};

use crate::error::ValidationError;
use crate::limits::Limits;

/// Checks a submission, returning the parsed retention in hours.
///
/// Rules run in order: at least one file, integer retention within
/// `1..=24`, then the aggregate size against `limits`. The size check is
/// skipped when any file has an unknown size.
pub fn validate(
    files: &[SelectedFile],
    retention_raw: &str,
    limits: Limits,
) -> Result<u32, ValidationError> {
    if files.is_empty() {
        return Err(ValidationError::NoFilesSelected);
    }

    let hours = parse_retention(retention_raw).ok_or(ValidationError::InvalidRetention)?;

    if let Some(total_bytes) = total_size(files)
        && total_bytes > limits.max_total_bytes
    {
        return Err(ValidationError::SizeLimitExceeded {
            total_bytes,
            limit_bytes: limits.max_total_bytes,
        });
    }

    Ok(hours)
}

fn parse_retention(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|h| (MIN_RETENTION_HOURS..=MAX_RETENTION_HOURS).contains(h))
}

/// Sum of all sizes, or `None` if any is unknown.
fn total_size(files: &[SelectedFile]) -> Option<u64> {
    files
        .iter()
        .try_fold(0u64, |acc, f| f.size.map(|s| acc.saturating_add(s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::LimitSource;
    use skydrop_protocol::constants::MIB;

    fn file(name: &str, size: Option<u64>) -> SelectedFile {
        SelectedFile::new(name, format!("/tmp/{name}"), size)
    }

    fn limit(bytes: u64) -> Limits {
        Limits {
            max_total_bytes: bytes,
            source: LimitSource::Server,
        }
    }

    #[test]
    fn retention_bounds() {
        let files = [file("a.txt", Some(1))];
        let l = Limits::default();

        assert_eq!(validate(&files, "1", l), Ok(1));
        assert_eq!(validate(&files, "24", l), Ok(24));
        assert_eq!(validate(&files, "0", l), Err(ValidationError::InvalidRetention));
        assert_eq!(validate(&files, "25", l), Err(ValidationError::InvalidRetention));
    }

    #[test]
    fn retention_must_be_integer() {
        let files = [file("a.txt", Some(1))];
        for raw in ["", "abc", "2.5", "-1", "1e1", "twelve"] {
            assert_eq!(
                validate(&files, raw, Limits::default()),
                Err(ValidationError::InvalidRetention),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn retention_whitespace_is_trimmed() {
        let files = [file("a.txt", Some(1))];
        assert_eq!(validate(&files, " 3 ", Limits::default()), Ok(3));
    }

    #[test]
    fn no_files_rejected_regardless_of_retention() {
        for raw in ["1", "0", "abc", ""] {
            assert_eq!(
                validate(&[], raw, Limits::default()),
                Err(ValidationError::NoFilesSelected)
            );
        }
    }

    #[test]
    fn total_equal_to_limit_passes() {
        let files = [file("a", Some(10 * MIB)), file("b", Some(15 * MIB))];
        assert_eq!(validate(&files, "1", limit(25 * MIB)), Ok(1));
    }

    #[test]
    fn total_over_limit_rejected() {
        let files = [file("a", Some(10 * MIB)), file("b", Some(20 * MIB))];
        let err = validate(&files, "2", limit(25 * MIB)).unwrap_err();

        assert_eq!(
            err,
            ValidationError::SizeLimitExceeded {
                total_bytes: 30 * MIB,
                limit_bytes: 25 * MIB,
            }
        );
        assert!(err.to_string().contains("25 MB"));
    }

    #[test]
    fn same_files_pass_under_larger_limit() {
        let files = [file("a", Some(10 * MIB)), file("b", Some(20 * MIB))];
        assert_eq!(validate(&files, "2", limit(50 * MIB)), Ok(2));
    }

    #[test]
    fn unknown_size_skips_aggregate_check() {
        let files = [file("a", Some(600 * MIB)), file("pipe", None)];
        assert_eq!(validate(&files, "1", Limits::default()), Ok(1));
    }

    #[test]
    fn default_limit_accepts_100_mib() {
        let files = [file("big.iso", Some(100 * MIB))];
        assert_eq!(validate(&files, "1", Limits::default()), Ok(1));
    }

    #[test]
    fn retention_checked_before_size() {
        let files = [file("a", Some(600 * MIB))];
        assert_eq!(
            validate(&files, "99", Limits::default()),
            Err(ValidationError::InvalidRetention)
        );
    }
}
