//! Console and dated-file destinations for formatted log lines

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::buffer::{LogBuffer, LogEntry};
use super::severity::Severity;

/// Where console output goes
#[derive(Clone, Default)]
pub enum Console {
    #[default]
    Stderr,
    Stdout,
    /// In-memory buffer, for embedding and for observing output in tests
    Buffer(Arc<LogBuffer>),
    /// No console output. Only reachable by embedders building
    /// `RegistrySettings` by hand; the config file cannot select it.
    Disabled,
}

impl Console {
    /// The console accepts every severity
    pub const THRESHOLD: Severity = Severity::Debug;

    pub fn accepts(&self, severity: Severity) -> bool {
        !matches!(self, Console::Disabled) && severity >= Self::THRESHOLD
    }

    /// Write one record as a single line
    pub fn write_entry(&self, entry: &LogEntry) -> io::Result<()> {
        match self {
            Console::Stderr => {
                let mut out = io::stderr().lock();
                writeln!(out, "{}", entry.to_line())?;
                out.flush()
            }
            Console::Stdout => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}", entry.to_line())?;
                out.flush()
            }
            Console::Buffer(buffer) => {
                buffer.push(entry.clone());
                Ok(())
            }
            Console::Disabled => Ok(()),
        }
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Console::Stderr => f.write_str("Stderr"),
            Console::Stdout => f.write_str("Stdout"),
            Console::Buffer(buffer) => write!(f, "Buffer({} entries)", buffer.len()),
            Console::Disabled => f.write_str("Disabled"),
        }
    }
}

/// Build the file name `{prefix}{YYYYMMDD}.{ext}`
pub fn dated_file_name(prefix: &str, stamp: &str, extension: &str) -> String {
    format!("{}{}.{}", prefix, stamp, extension)
}

/// Append-only handle on one dated log file
///
/// The handle stays open until `close()` or drop. Every line is flushed as
/// soon as it is written.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl FileSink {
    /// Debug records never reach the file
    pub const THRESHOLD: Severity = Severity::Info;

    /// Open (or create) `path` for appending, creating its directory if needed
    pub fn open(path: PathBuf) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            file: Mutex::new(Some(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn accepts(&self, severity: Severity) -> bool {
        severity >= Self::THRESHOLD
    }

    /// Append one record as a single line
    pub fn write_entry(&self, entry: &LogEntry) -> io::Result<()> {
        let mut line = entry.to_line();
        line.push('\n');

        let mut guard = self.file.lock().map_err(|_| poisoned())?;
        let file = guard.as_mut().ok_or_else(closed)?;
        file.write_all(line.as_bytes())?;
        file.flush()
    }

    pub fn flush(&self) -> io::Result<()> {
        let mut guard = self.file.lock().map_err(|_| poisoned())?;
        match guard.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }

    /// Flush and release the handle. Closing twice is a no-op.
    pub fn close(&self) -> io::Result<()> {
        let mut guard = self.file.lock().map_err(|_| poisoned())?;
        match guard.take() {
            Some(mut file) => {
                file.flush()?;
                file.sync_all()
            }
            None => Ok(()),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.file.lock().map(|guard| guard.is_none()).unwrap_or(true)
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

fn poisoned() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "file sink lock poisoned")
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "file sink is closed")
}
