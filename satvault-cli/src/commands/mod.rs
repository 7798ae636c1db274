//! CLI command implementations

pub mod logs;
pub mod register;
pub mod sandbox;
pub mod send;
pub mod status;
pub mod transactions;
pub mod wallet;

use std::path::PathBuf;

use anyhow::{Context, Result};
use satvault_core::{EntryPoint, LogEvent, LoggingService, SatvaultContext};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let satvault_dir = get_satvault_dir();
    // Ensure directory exists
    std::fs::create_dir_all(&satvault_dir).ok()?;
    LoggingService::new(&satvault_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the satvault directory from environment or default
pub fn get_satvault_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SATVAULT_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".satvault")
    }
}

/// Get or create satvault context
pub fn get_context() -> Result<SatvaultContext> {
    let satvault_dir = get_satvault_dir();

    // Create directory if it doesn't exist
    std::fs::create_dir_all(&satvault_dir)
        .with_context(|| format!("Failed to create satvault directory: {:?}", satvault_dir))?;

    SatvaultContext::new(&satvault_dir).context("Failed to initialize satvault context")
}
