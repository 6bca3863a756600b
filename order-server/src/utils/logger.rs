//! Logging Infrastructure
//!
//! Console output plus an optional daily rotating file under `WORK_DIR/logs`.
//! `RUST_LOG` overrides the configured level when set.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logger, console only
pub fn init_logger(level: &str) -> anyhow::Result<()> {
    init_logger_with_file(level, None)
}

/// Initialize the logging system
///
/// # Examples
/// ```no_run
/// // Console only
/// order_server::init_logger_with_file("debug", None)?;
///
/// // Console + ./data/logs/order-server.YYYY-MM-DD
/// order_server::init_logger_with_file("info", Some(std::path::Path::new("./data/logs")))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(level: &str, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "order-server");
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_thread_ids(true)
                .with_writer(std::sync::Mutex::new(appender));
            Some(layer)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
