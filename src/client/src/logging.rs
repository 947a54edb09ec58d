use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    prelude::*,
    EnvFilter,
};

pub const LOG_FILE: &str = "beacon.log";

/// Installs the global tracing subscriber, writing to `beacon.log` in the
/// given directory. Call once from the host application.
pub fn setup_logging(directory: &Path) -> Result<()> {
    // Set up the filter
    let filter = EnvFilter::from("debug");

    let file_appender = RollingFileAppender::new(Rotation::NEVER, directory, LOG_FILE);

    let file_layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_level(true)
        .with_timer(SystemTime)
        .with_writer(file_appender);

    let subscriber = tracing_subscriber::registry().with(filter).with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    tracing::info!("Logging system initialized. Writing to {}", LOG_FILE);

    Ok(())
}
