use std::io::BufRead;

use anyhow::{Context, Result};

use daylog::clock::{Clock, SystemClock};
use daylog::config::Config;
use daylog::logging::{self, LoggerRegistry, Severity};

const USAGE: &str = "usage: daylog [debug|info|warn|warning|error|critical] [MESSAGE...]";

fn main() -> Result<()> {
    let config = Config::load()?;
    config.ensure_directories()?;

    // Diagnostics first, so failures below are visible
    logging::init_diagnostics(&config.diagnostics_filter)?;

    let mut args = std::env::args().skip(1);
    let severity = match args.next() {
        Some(arg) if arg == "-h" || arg == "--help" => {
            println!("{}", USAGE);
            return Ok(());
        }
        Some(arg) => arg
            .parse::<Severity>()
            .with_context(|| format!("{}\n{}", arg, USAGE))?,
        None => Severity::Info,
    };
    let message: Vec<String> = args.collect();

    if config.file_retention_days > 0 {
        let today = SystemClock.today();
        match logging::cleanup_old_logs(
            &config.log_dir,
            &config.file_extension,
            config.file_retention_days,
            today,
        ) {
            Ok(count) if count > 0 => tracing::info!("Cleaned up {} old log files", count),
            Ok(_) => {}
            Err(e) => tracing::warn!("Failed to clean up old log files: {}", e),
        }
    }

    let registry = LoggerRegistry::new(config.registry_settings());

    if message.is_empty() {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read stdin")?;
            registry.emit(severity, &line);
        }
    } else {
        registry.emit(severity, &message.join(" "));
    }

    registry.shutdown();
    Ok(())
}
