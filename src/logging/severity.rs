//! Severity classes and their static channel/file mapping

use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// One of the five fixed severity classes, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// All classes, most verbose first
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Record name written into every log line
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Logical channel name, also the first half of the cache key
    pub fn logger_name(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Error => "error",
            Severity::Critical => "critical",
        }
    }

    /// Prefix of the dated file this class writes to
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Severity::Debug | Severity::Info => "log",
            Severity::Warning | Severity::Error | Severity::Critical => "important",
        }
    }

    /// Numeric level (10 through 50)
    pub fn level(&self) -> u8 {
        match self {
            Severity::Debug => 10,
            Severity::Info => 20,
            Severity::Warning => 30,
            Severity::Error => 40,
            Severity::Critical => 50,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            // Both historical spellings collapse onto one class
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" | "fatal" => Ok(Severity::Critical),
            _ => Err(RegistryError::InvalidSeverity(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = RegistryError;

    fn try_from(level: u8) -> Result<Self, RegistryError> {
        match level {
            10 => Ok(Severity::Debug),
            20 => Ok(Severity::Info),
            30 => Ok(Severity::Warning),
            40 => Ok(Severity::Error),
            50 => Ok(Severity::Critical),
            other => Err(RegistryError::InvalidSeverity(other.to_string())),
        }
    }
}
