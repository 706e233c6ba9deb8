//! A logger bound to one channel and one calendar day

use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{RegistryError, Result};

use super::buffer::LogEntry;
use super::key::LoggerKey;
use super::severity::Severity;
use super::sink::{dated_file_name, Console, FileSink};

/// Fans each record out to a console and a dated file
///
/// Built once per `LoggerKey` and never mutated afterwards, apart from the
/// file handle being closed on eviction or shutdown.
#[derive(Debug)]
pub struct LoggerInstance {
    key: LoggerKey,
    console: Console,
    file: FileSink,
}

impl LoggerInstance {
    /// Open the file sink for `severity` on the key's day under `log_dir`
    pub fn open(
        key: LoggerKey,
        severity: Severity,
        log_dir: &Path,
        extension: &str,
        console: Console,
    ) -> Result<Self> {
        let path = log_dir.join(dated_file_name(
            severity.file_prefix(),
            &key.stamp(),
            extension,
        ));
        let file = FileSink::open(path).map_err(|source| RegistryError::ConstructionFailure {
            key: key.to_string(),
            source,
        })?;

        Ok(Self { key, console, file })
    }

    pub fn key(&self) -> &LoggerKey {
        &self.key
    }

    pub fn file_path(&self) -> &Path {
        self.file.path()
    }

    /// Write `message` to every sink whose threshold admits `severity`
    ///
    /// Both sinks are attempted even if the first one fails; the first
    /// failure is returned.
    pub fn log(&self, severity: Severity, message: &str, timestamp: NaiveDateTime) -> Result<()> {
        let entry = LogEntry::new(timestamp, severity, self.key.logger_name(), message);

        let console = if self.console.accepts(severity) {
            self.console
                .write_entry(&entry)
                .map_err(|source| RegistryError::SinkWrite {
                    sink: "console",
                    source,
                })
        } else {
            Ok(())
        };

        let file = if self.file.accepts(severity) {
            self.file
                .write_entry(&entry)
                .map_err(|source| RegistryError::SinkWrite {
                    sink: "file",
                    source,
                })
        } else {
            Ok(())
        };

        console.and(file)
    }

    /// Flush and release the file handle
    pub fn close(&self) -> std::io::Result<()> {
        self.file.close()
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::buffer::LogBuffer;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 2).unwrap()
    }

    #[test]
    fn test_open_names_file_by_prefix_and_day() {
        let temp_dir = TempDir::new().unwrap();
        let key = LoggerKey::for_severity(Severity::Error, day());
        let instance =
            LoggerInstance::open(key, Severity::Error, temp_dir.path(), "txt", Console::Disabled)
                .unwrap();
        assert_eq!(
            instance.file_path(),
            temp_dir.path().join("important20260402.txt").as_path()
        );
    }

    #[test]
    fn test_debug_goes_to_console_only() {
        let temp_dir = TempDir::new().unwrap();
        let buffer = Arc::new(LogBuffer::new(10));
        let key = LoggerKey::for_severity(Severity::Debug, day());
        let instance = LoggerInstance::open(
            key,
            Severity::Debug,
            temp_dir.path(),
            "txt",
            Console::Buffer(Arc::clone(&buffer)),
        )
        .unwrap();

        instance
            .log(Severity::Debug, "noisy", day().and_hms_opt(8, 0, 0).unwrap())
            .unwrap();

        assert_eq!(buffer.len(), 1);
        let content = std::fs::read_to_string(instance.file_path()).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_construction_failure() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the log directory should be
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let key = LoggerKey::for_severity(Severity::Info, day());
        let err = LoggerInstance::open(key, Severity::Info, &blocker, "txt", Console::Disabled)
            .unwrap_err();
        assert!(matches!(err, RegistryError::ConstructionFailure { ref key, .. } if key == "info20260402"));
    }

    #[test]
    fn test_log_after_close_reports_file_failure() {
        let temp_dir = TempDir::new().unwrap();
        let key = LoggerKey::for_severity(Severity::Info, day());
        let instance =
            LoggerInstance::open(key, Severity::Info, temp_dir.path(), "txt", Console::Disabled)
                .unwrap();
        instance.close().unwrap();
        assert!(instance.is_closed());

        let err = instance
            .log(Severity::Info, "late", day().and_hms_opt(8, 0, 0).unwrap())
            .unwrap_err();
        assert!(matches!(err, RegistryError::SinkWrite { sink: "file", .. }));
    }
}
