use std::fmt::Display;

use chrono::Utc;
use once_cell::sync::Lazy;

use crate::constants::{DEVELOPMENT_RUN_MODE, RUN_MODE_ENV_VAR};

static DEVELOPMENT: Lazy<bool> =
    Lazy::new(|| is_development_mode(std::env::var(RUN_MODE_ENV_VAR).ok().as_deref()));

fn is_development_mode(run_mode: Option<&str>) -> bool {
    run_mode == Some(DEVELOPMENT_RUN_MODE)
}

/// Whether the process runs in development mode. Read once per process from
/// the `BEACON_ENV` environment variable.
pub fn is_development() -> bool {
    *DEVELOPMENT
}

fn format_message(message: impl Display) -> String {
    format!("[{}] {}", Utc::now().to_rfc3339(), message)
}

/// Logs to stdout only in development mode.
pub fn dev_log(message: impl Display) {
    if is_development() {
        println!("{}", format_message(message));
    }
}

/// Logs a warning to stderr only in development mode.
pub fn dev_warn(message: impl Display) {
    if is_development() {
        eprintln!("{}", format_message(format!("warning: {}", message)));
    }
}

/// Logs to stderr only in development mode.
pub fn dev_error(message: impl Display) {
    if is_development() {
        eprintln!("{}", format_message(message));
    }
}

/// Always logs to stdout, regardless of run mode.
pub fn log(message: impl Display) {
    println!("{}", format_message(message));
}

/// Always logs to stderr, regardless of run mode.
pub fn error(message: impl Display) {
    eprintln!("{}", format_message(message));
}
