//! Logging bootstrap for the skill.
//!
//! stdout carries the response envelope, so logs go to stderr unless a log directory is
//! configured, in which case they go to size-rotated files there. File records are written as
//! they are logged, and [`flush_logging`] should still be called before the process exits.
//!
//! # Invariants
//! - Initialization happens at most once per process.
//! - Initialization never panics.
//! - A second call with a different level or directory is rejected.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

const LOG_FILE_BASENAME: &str = "bank_holidays";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: Option<PathBuf>,
    logger: LoggerHandle,
}

/// Initializes logging at `level`, to `log_dir` when given and stderr otherwise.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when `log_dir` is not absolute or cannot be created.
/// - Returns an error when logging is already running with a different configuration.
/// - Returns an error when the logger backend fails to start.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<()> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.map(normalize_log_dir).transpose()?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        let logger = Logger::try_with_str(level)
            .with_context(|| format!("invalid log level `{level}`"))?;

        let logger = match &log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create log directory `{}`", dir.display()))?;

                logger
                    .log_to_file(
                        FileSpec::default()
                            .directory(dir.as_path())
                            .basename(LOG_FILE_BASENAME),
                    )
                    .rotate(
                        Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                        Naming::Numbers,
                        Cleanup::KeepLogFiles(MAX_LOG_FILES),
                    )
                    .write_mode(WriteMode::Direct)
                    .append()
                    .format_for_files(flexi_logger::detailed_format)
            },
            None => logger
                .log_to_stderr()
                .format_for_stderr(flexi_logger::detailed_format),
        };

        let logger = logger
            .start()
            .context("failed to start logger")?;

        info!(
            "event=logging_init status=ok level={} target={} version={}",
            level,
            log_dir.as_ref().map_or_else(|| "stderr".to_string(), |d| d.display().to_string()),
            env!("CARGO_PKG_VERSION")
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.clone(),
            logger,
        })
    })?;

    if state.level != level || state.log_dir != log_dir {
        bail!(
            "logging already initialized with level `{}`; refusing to reconfigure",
            state.level
        );
    }

    Ok(())
}

/// Writes out any log records still held by the logger. Does nothing before [`init_logging`].
pub fn flush_logging() {
    if let Some(state) = LOGGING_STATE.get() {
        state.logger.flush();
    }
}

/// `debug` for debug builds, `info` for release builds
#[must_use] pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(anyhow!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf> {
    if log_dir.as_os_str().is_empty() {
        bail!("log_dir cannot be empty");
    }
    if !log_dir.is_absolute() {
        bail!("log_dir must be an absolute path, got `{}`", log_dir.display());
    }
    Ok(log_dir.to_path_buf())
}
