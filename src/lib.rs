//! daylog - per-day, per-severity loggers writing to the console and dated files
//!
//! Create one `LoggerRegistry` at start-up, pass it (or an `Arc` of it) to the
//! code that logs, and call `shutdown()` before exit to flush every file.
//!
//! ```no_run
//! use daylog::logging::{LoggerRegistry, RegistrySettings};
//!
//! let registry = LoggerRegistry::new(RegistrySettings::default());
//! registry.info("service started");
//! registry.warning("cache is cold");
//! registry.shutdown();
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use error::{RegistryError, Result};
