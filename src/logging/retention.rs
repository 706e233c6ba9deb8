//! On-disk retention for dated log files
//!
//! The registry only drops stale handles from memory. Files themselves are
//! removed here, based on the day stamp in their name rather than mtime.

use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{Days, NaiveDate};

use super::key::DAY_STAMP_FORMAT;
use super::severity::Severity;

/// Default retention period in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Day stamped into a file named `{prefix}{YYYYMMDD}.{extension}`, if it is one of ours
pub fn parse_file_day(file_name: &str, extension: &str) -> Option<NaiveDate> {
    let stem = file_name.strip_suffix(extension)?.strip_suffix('.')?;

    let stamp = Severity::ALL
        .iter()
        .map(|s| s.file_prefix())
        .find_map(|prefix| stem.strip_prefix(prefix))?;

    if stamp.len() != 8 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(stamp, DAY_STAMP_FORMAT).ok()
}

/// Delete dated log files stamped more than `retention_days` before `today`
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(
    logs_dir: &Path,
    extension: &str,
    retention_days: u64,
    today: NaiveDate,
) -> Result<usize> {
    if !logs_dir.exists() {
        return Ok(0);
    }

    let Some(cutoff) = today.checked_sub_days(Days::new(retention_days)) else {
        return Ok(0);
    };

    let mut deleted_count = 0;

    for entry in fs::read_dir(logs_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(day) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| parse_file_day(n, extension))
        else {
            continue;
        };

        if day < cutoff && fs::remove_file(&path).is_ok() {
            deleted_count += 1;
        }
    }

    Ok(deleted_count)
}
