//! The crate's own diagnostics channel
//!
//! Failures inside the registry are swallowed on purpose, but they are still
//! reported through `tracing`. This installs the subscriber that prints them.

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config names one
pub const DEFAULT_DIAGNOSTICS_FILTER: &str = "daylog=warn";

/// Build the filter: `RUST_LOG` wins, then `fallback`
pub fn diagnostics_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIAGNOSTICS_FILTER))
}

/// Install a stderr subscriber for the crate's diagnostics
///
/// Fails if a global subscriber is already set.
pub fn init_diagnostics(fallback_filter: &str) -> Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(diagnostics_filter(fallback_filter))
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install diagnostics subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_fallback_uses_default() {
        // An unparsable directive must not panic
        let filter = diagnostics_filter("daylog=[");
        assert!(!filter.to_string().is_empty());
    }
}
