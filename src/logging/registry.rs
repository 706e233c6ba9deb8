//! Process-wide cache of per-day, per-severity loggers
//!
//! The registry maps `(channel, day)` keys to lazily built `LoggerInstance`s.
//! Lookups take the shared read lock; construction and eviction happen under
//! the exclusive write lock with a second lookup once it is held, so at most
//! one instance is ever built per key.
//!
//! When a new instance is built for a channel, the entry for that channel
//! dated two days earlier is closed and dropped. Eviction is lazy: a channel
//! that is never logged to again keeps its old entries until `shutdown()`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::clock::{Clock, SystemClock};
use crate::error::{RegistryError, Result};

use super::instance::LoggerInstance;
use super::key::LoggerKey;
use super::severity::Severity;
use super::sink::Console;

/// How new logger instances are wired up
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    /// Directory holding the dated files
    pub log_dir: PathBuf,
    /// Extension of the dated files, without the dot
    pub file_extension: String,
    /// Console target shared by every instance
    pub console: Console,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("."),
            file_extension: "txt".to_string(),
            console: Console::Stderr,
        }
    }
}

/// Resolves severities to live, correctly dated loggers
pub struct LoggerRegistry {
    settings: RegistrySettings,
    clock: Arc<dyn Clock>,
    loggers: RwLock<HashMap<LoggerKey, Arc<LoggerInstance>>>,
    constructed: AtomicUsize,
    evicted: AtomicUsize,
    shut_down: AtomicBool,
}

impl LoggerRegistry {
    /// Create a registry driven by the system clock
    pub fn new(settings: RegistrySettings) -> Self {
        Self::with_clock(settings, Arc::new(SystemClock))
    }

    /// Create a registry driven by an arbitrary clock
    pub fn with_clock(settings: RegistrySettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            clock,
            loggers: RwLock::new(HashMap::new()),
            constructed: AtomicUsize::new(0),
            evicted: AtomicUsize::new(0),
            shut_down: AtomicBool::new(false),
        }
    }

    /// Get today's logger for `severity`, building it on first use
    pub fn resolve(&self, severity: Severity) -> Result<Arc<LoggerInstance>> {
        let today = self.clock.today();
        self.resolve_for_day(severity, LoggerKey::for_severity(severity, today))
    }

    /// Like `resolve`, for a level given by name ("info", "warn", ...)
    pub fn resolve_named(&self, name: &str) -> Result<Arc<LoggerInstance>> {
        self.resolve(name.parse()?)
    }

    /// Like `resolve`, for a numeric level (10, 20, ... 50)
    pub fn resolve_level(&self, level: u8) -> Result<Arc<LoggerInstance>> {
        self.resolve(Severity::try_from(level)?)
    }

    fn resolve_for_day(&self, severity: Severity, key: LoggerKey) -> Result<Arc<LoggerInstance>> {
        if self.is_shut_down() {
            return Err(RegistryError::ShutDown);
        }

        // Fast path
        {
            let loggers = self
                .loggers
                .read()
                .map_err(|_| RegistryError::LockPoisoned)?;
            if let Some(instance) = loggers.get(&key) {
                return Ok(Arc::clone(instance));
            }
        }

        let mut loggers = self
            .loggers
            .write()
            .map_err(|_| RegistryError::LockPoisoned)?;

        // Another thread may have built it while we waited for the lock
        if let Some(instance) = loggers.get(&key) {
            return Ok(Arc::clone(instance));
        }
        // shutdown() may have run while we waited, too
        if self.is_shut_down() {
            return Err(RegistryError::ShutDown);
        }

        let instance = Arc::new(LoggerInstance::open(
            key,
            severity,
            &self.settings.log_dir,
            &self.settings.file_extension,
            self.settings.console.clone(),
        )?);
        loggers.insert(key, Arc::clone(&instance));
        self.constructed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            "Opened logger {} -> {}",
            key,
            instance.file_path().display()
        );

        match self.evict_stale(&mut loggers, severity, key) {
            Ok(Some(stale)) => tracing::debug!("Evicted logger {}", stale),
            Ok(None) => {}
            Err(e) => tracing::warn!("{}", e),
        }

        Ok(instance)
    }

    /// Remove and close the entry two days older than `fresh`, if cached
    fn evict_stale(
        &self,
        loggers: &mut HashMap<LoggerKey, Arc<LoggerInstance>>,
        severity: Severity,
        fresh: LoggerKey,
    ) -> Result<Option<LoggerKey>> {
        let stale = LoggerKey::stale(severity, fresh.day()).ok_or_else(|| {
            RegistryError::EvictionFailure {
                key: fresh.to_string(),
                reason: "no calendar day two days earlier".to_string(),
            }
        })?;

        let Some(instance) = loggers.remove(&stale) else {
            return Ok(None);
        };
        self.evicted.fetch_add(1, Ordering::Relaxed);

        if instance.is_closed() {
            return Err(RegistryError::EvictionFailure {
                key: stale.to_string(),
                reason: "file sink already closed".to_string(),
            });
        }
        instance
            .close()
            .map_err(|e| RegistryError::EvictionFailure {
                key: stale.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Some(stale))
    }

    /// Write `message` at `severity`, reporting any failure
    pub fn try_emit(&self, severity: Severity, message: &str) -> Result<()> {
        // One clock read so the key's day and the timestamp agree
        let now = self.clock.now();
        let key = LoggerKey::for_severity(severity, now.date());
        let instance = self.resolve_for_day(severity, key)?;
        instance.log(severity, message, now)
    }

    /// Write `message` at `severity`. Never fails; problems are reported on
    /// the crate's diagnostics channel and the message is dropped.
    pub fn emit(&self, severity: Severity, message: &str) {
        if let Err(e) = self.try_emit(severity, message) {
            tracing::warn!("Dropped {} message: {}", severity, e);
        }
    }

    /// Like `try_emit`, for a level given by name
    pub fn try_emit_named(&self, name: &str, message: &str) -> Result<()> {
        self.try_emit(name.parse()?, message)
    }

    /// Like `emit`, for a level given by name; unknown names are a no-op
    pub fn emit_named(&self, name: &str, message: &str) {
        if let Err(e) = self.try_emit_named(name, message) {
            tracing::warn!("Dropped message: {}", e);
        }
    }

    /// Like `emit`, for a numeric level; unknown levels are a no-op
    pub fn emit_level(&self, level: u8, message: &str) {
        let result = Severity::try_from(level).and_then(|s| self.try_emit(s, message));
        if let Err(e) = result {
            tracing::warn!("Dropped message: {}", e);
        }
    }

    pub fn debug(&self, message: &str) {
        self.emit(Severity::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Severity::Info, message);
    }

    /// Same class as `warning`
    pub fn warn(&self, message: &str) {
        self.emit(Severity::Warning, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Severity::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Severity::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.emit(Severity::Critical, message);
    }

    /// Cached instance for `key`, without building anything
    pub fn lookup(&self, key: &LoggerKey) -> Option<Arc<LoggerInstance>> {
        self.loggers
            .read()
            .ok()
            .and_then(|loggers| loggers.get(key).cloned())
    }

    /// Keys currently cached, in no particular order
    pub fn keys(&self) -> Vec<LoggerKey> {
        self.loggers
            .read()
            .map(|loggers| loggers.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.loggers.read().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of instances built since creation
    pub fn constructed_count(&self) -> usize {
        self.constructed.load(Ordering::Relaxed)
    }

    /// Number of instances pruned by the retention rule
    pub fn evicted_count(&self) -> usize {
        self.evicted.load(Ordering::Relaxed)
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::Acquire)
    }

    /// Flush and close every cached logger and stop handing out new ones
    ///
    /// Returns the number of instances closed. Calling it again is a no-op.
    pub fn shutdown(&self) -> usize {
        self.shut_down.store(true, Ordering::Release);

        let drained: Vec<(LoggerKey, Arc<LoggerInstance>)> = match self.loggers.write() {
            Ok(mut loggers) => loggers.drain().collect(),
            Err(poisoned) => poisoned.into_inner().drain().collect(),
        };

        for (key, instance) in &drained {
            if let Err(e) = instance.close() {
                tracing::warn!("Failed to close logger {}: {}", key, e);
            }
        }
        if !drained.is_empty() {
            tracing::debug!("Closed {} loggers", drained.len());
        }
        drained.len()
    }
}

impl Drop for LoggerRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}
