#![deny(missing_docs)]
//! Shared logging utilities for the ISG exporter workspace.
//!
//! This crate provides the `isg_*` logging macros used across the codebase,
//! level resolution for the `log.level`/`verbose` settings, and terminal
//! logger initialization for embedders and tests.

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, TermLogger, TerminalMode};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! isg_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! isg_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! isg_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! isg_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! isg_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Resolves a textual log level into a filter.
///
/// `verbose` is a shortcut for `debug` and wins over `level`. Returns `None`
/// when `level` is not a known level name.
pub fn resolve_level(level: &str, verbose: bool) -> Option<LevelFilter> {
    if verbose {
        return Some(LevelFilter::Debug);
    }
    level.trim().parse::<LevelFilter>().ok()
}

/// Initializes the global terminal logger.
///
/// An unknown `level` falls back to `info` and is reported once the logger is
/// installed. Safely no-ops if another logger has already been initialized.
pub fn initialize(level: &str, verbose: bool) {
    match resolve_level(level, verbose) {
        Some(filter) => init_terminal(filter),
        None => {
            init_terminal(LevelFilter::Info);
            log::warn!("Could not parse log level {:?}, falling back to info", level);
        }
    }
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    init_terminal(level);
}

fn init_terminal(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build();

    // Ignore the error if a logger was already set.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
