//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFile;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the active log inside the log directory.
pub const LOG_FILE_NAME: &str = "reelscout.log";

/// Initializes the tracing subscriber with JSON output to a rotating file.
///
/// # Level Resolution
///
/// 1. `RUST_LOG`, if set and valid
/// 2. `config.trace_level`
/// 3. Default: `"info"`
///
/// # File Location
///
/// `reelscout.log` inside [`log_dir`](crate::infrastructure::log_dir). The
/// terminal stays free for rendering, so nothing is logged to stdout.
///
/// # Initialization Behavior
///
/// - Creates the log directory if it doesn't exist
/// - Silently returns if directory creation fails
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust,no_run
/// use reelscout::observability::init_tracing;
/// use reelscout::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let dir = crate::infrastructure::log_dir(config);
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }

    let writer = Arc::new(RotatingFile::new(dir.join(LOG_FILE_NAME)));
    let layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_ansi(false)
        .with_writer(Arc::clone(&writer));

    if tracing_subscriber::registry().with(filter).with(layer).try_init().is_ok() {
        tracing::debug!(path = %writer.path().display(), "logging to file");
    }
}
