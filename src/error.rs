//! Error types for logger resolution and emission

use thiserror::Error;

/// Everything that can go wrong between a log call and the sinks.
///
/// None of these ever reach callers of the no-fail entry points
/// (`LoggerRegistry::emit` and friends); they are surfaced only through the
/// `try_*` and `resolve*` methods.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The requested level is not one of the known severity classes
    #[error("invalid severity: {0}")]
    InvalidSeverity(String),

    /// A sink for a new logger instance could not be created
    #[error("failed to construct logger {key}: {source}")]
    ConstructionFailure {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stale logger instance could not be removed or closed cleanly
    #[error("failed to evict logger {key}: {reason}")]
    EvictionFailure { key: String, reason: String },

    /// Writing a formatted line to a sink failed
    #[error("failed to write to {sink} sink: {source}")]
    SinkWrite {
        sink: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Another thread panicked while holding the registry lock
    #[error("logger registry lock poisoned")]
    LockPoisoned,

    /// The registry has been shut down and no longer hands out loggers
    #[error("logger registry is shut down")]
    ShutDown,
}

pub type Result<T> = std::result::Result<T, RegistryError>;
