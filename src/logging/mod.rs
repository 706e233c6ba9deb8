//! Per-day, per-severity loggers
//!
//! A `LoggerRegistry` hands out one `LoggerInstance` per severity channel
//! per calendar day. Each instance writes to the console and to a dated file
//! (`log{YYYYMMDD}.txt` for debug/info, `important{YYYYMMDD}.txt` above that).

mod buffer;
mod diagnostics;
mod instance;
mod key;
mod registry;
mod retention;
mod severity;
mod sink;

pub use buffer::{LogBuffer, LogEntry, TIMESTAMP_FORMAT};
pub use diagnostics::{init_diagnostics, DEFAULT_DIAGNOSTICS_FILTER};
pub use instance::LoggerInstance;
pub use key::{LoggerKey, EVICTION_AGE_DAYS};
pub use registry::{LoggerRegistry, RegistrySettings};
pub use retention::{cleanup_old_logs, parse_file_day, DEFAULT_RETENTION_DAYS};
pub use severity::Severity;
pub use sink::{dated_file_name, Console, FileSink};
