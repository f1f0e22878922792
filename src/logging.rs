//! Tracing setup
//!
//! The interactive shell owns the terminal, so it logs to a file through a
//! non-blocking appender. Headless modes log to stderr. The filter comes
//! from `RUST_LOG`, falling back to the configured level.

use anyhow::{Context, Result};
use play_architect_core::config::LogSettings;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "play-architect.log";

/// Where log output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    /// Target for the interactive shell: the configured file, else the
    /// platform data directory
    pub fn for_tui(settings: &LogSettings) -> Self {
        LogTarget::File(
            settings
                .file
                .clone()
                .unwrap_or_else(default_log_path),
        )
    }
}

/// `<data_dir>/play-architect/play-architect.log` (temp dir as fallback)
pub fn default_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("play-architect")
        .join(LOG_FILE_NAME)
}

/// Filter from `RUST_LOG`, else `level`
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes the file writer.
pub fn init_logging(settings: &LogSettings, target: &LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(&settings.level);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;
            Ok(None)
        }
        LogTarget::File(path) => {
            let (dir, file_name) = split_log_path(path);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {:?}", dir))?;

            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

            tracing::info!("Logging initialized to: {:?}", path);
            Ok(Some(guard))
        }
    }
}

fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME));
    (dir, file_name)
}
