//! Log records and an in-memory console target
//!
//! `LogEntry` is the one place a record is rendered to text; the console and
//! file sinks both write `LogEntry::to_line()` so their output is identical.
//! `LogBuffer` is a thread-safe ring buffer that can stand in for a console
//! stream when output has to be observed in-process.

use std::collections::VecDeque;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use super::severity::Severity;

/// Timestamp layout of a rendered record (millisecond precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// A single log record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local time the record was emitted
    pub timestamp: NaiveDateTime,
    /// Severity it was emitted at
    pub severity: Severity,
    /// Channel (logger name) it went through
    pub channel: String,
    /// Caller's message, verbatim
    pub message: String,
}

impl LogEntry {
    pub fn new(
        timestamp: NaiveDateTime,
        severity: Severity,
        channel: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            severity,
            channel: channel.into(),
            message: message.into(),
        }
    }

    /// Render as `<timestamp> <SEVERITY> <channel> <message>` without a newline
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.severity.as_str(),
            self.channel,
            self.message
        )
    }
}

/// Thread-safe ring buffer of log entries
pub struct LogBuffer {
    /// All entries (capped at max_entries)
    entries: RwLock<VecDeque<LogEntry>>,
    max_entries: usize,
}

impl LogBuffer {
    /// Create a new log buffer holding at most `max_entries`
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_entries)),
            max_entries,
        }
    }

    /// Push a new log entry to the buffer
    pub fn push(&self, entry: LogEntry) {
        if self.max_entries == 0 {
            return;
        }
        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.max_entries {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }

    /// Snapshot of all buffered entries, oldest first
    pub fn all_entries(&self) -> Vec<LogEntry> {
        self.entries
            .read()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Snapshot of all buffered entries rendered as lines
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|e| e.iter().map(LogEntry::to_line).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 21)
            .unwrap()
            .and_hms_milli_opt(14, 30, 45, 123)
            .unwrap()
    }

    #[test]
    fn test_entry_line_format() {
        let entry = LogEntry::new(ts(), Severity::Warning, "warn", "disk almost full");
        assert_eq!(
            entry.to_line(),
            "2026-01-21 14:30:45,123 WARNING warn disk almost full"
        );
    }

    #[test]
    fn test_log_buffer_push_and_retrieve() {
        let buffer = LogBuffer::new(100);
        assert!(buffer.is_empty());

        buffer.push(LogEntry::new(ts(), Severity::Info, "info", "message 1"));
        buffer.push(LogEntry::new(ts(), Severity::Warning, "warn", "warning 1"));
        buffer.push(LogEntry::new(ts(), Severity::Critical, "critical", "critical 1"));

        assert_eq!(buffer.len(), 3);

        let entries = buffer.all_entries();
        assert_eq!(entries[0].message, "message 1");
        assert_eq!(entries[2].message, "critical 1");
        assert_eq!(buffer.lines()[1], "2026-01-21 14:30:45,123 WARNING warn warning 1");
    }

    #[test]
    fn test_log_buffer_capacity() {
        let buffer = LogBuffer::new(3);

        for i in 0..5 {
            buffer.push(LogEntry::new(ts(), Severity::Info, "info", format!("msg {}", i)));
        }

        let entries = buffer.all_entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "msg 2");
        assert_eq!(entries[2].message, "msg 4");
    }
}
