//! Logging Infrastructure
//!
//! Structured logging setup for the terminal binary. `RUST_LOG` overrides the
//! configured level when set.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON format and file output
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir exists
    if let Some(dir) = log_dir.filter(|d| Path::new(d).is_dir()) {
        let file_appender = tracing_appender::rolling::daily(dir, "pos-terminal");
        if json {
            builder.json().with_writer(file_appender).init();
        } else {
            builder.with_ansi(false).with_writer(file_appender).init();
        }
        return;
    }

    // Terminal output goes to stderr; stdout belongs to the register display
    if json {
        builder.json().with_writer(std::io::stderr).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
}
