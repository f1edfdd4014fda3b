//! Logging bootstrap and safety policy for the lookup core.
//!
//! # Responsibility
//! - Initialize process-wide logging exactly once.
//! - Offer a rolling file sink for embedded hosts and a stderr sink for
//!   command-line probes.
//!
//! # Invariants
//! - Logging init is idempotent for the same level and sink.
//! - Re-initialization with a different level or sink is rejected.
//! - Logging initialization must not panic.
//! - Log lines carry metadata only; question text and credentials are
//!   never written.
//!
//! # See also
//! - docs/architecture/logging.md

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

const LOG_FILE_BASENAME: &str = "opsdesk";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

/// Destination for log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Plain lines on standard error, keeping stdout free for replies.
    Stderr,
    /// Rolling files under the given absolute directory.
    File(PathBuf),
}

impl Display for LogSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogSink::Stderr => write!(f, "stderr"),
            LogSink::File(dir) => write!(f, "{}", dir.display()),
        }
    }
}

struct LoggingState {
    level: &'static str,
    sink: LogSink,
    _logger: LoggerHandle,
}

/// Initializes logging with a level and a sink.
///
/// Returns `Ok(())` when logging is active, or a human-readable error string
/// when initialization fails.
///
/// # Invariants
/// - Calling this function repeatedly with the same arguments is idempotent.
/// - Calling this function again with a different `level` is rejected.
/// - Calling this function again with a different `sink` is rejected.
/// - Initialization never panics.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when a file sink directory is empty, non-absolute, or
///   cannot be created.
/// - Returns an error when logger backend setup fails.
pub fn init_logging(level: &str, sink: LogSink) -> Result<(), String> {
    let normalized_level = normalize_level(level)?;
    let normalized_sink = normalize_sink(sink)?;

    if let Some(state) = LOGGING_STATE.get() {
        return check_active_state(state, normalized_level, &normalized_sink);
    }

    let init_level = normalized_level;
    let init_sink = normalized_sink.clone();

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState, String> {
        let builder = Logger::try_with_str(init_level)
            .map_err(|err| format!("invalid log level `{init_level}`: {err}"))?;

        let logger = match &init_sink {
            LogSink::Stderr => builder
                .log_to_stderr()
                .format_for_stderr(flexi_logger::detailed_format)
                .start(),
            LogSink::File(dir) => {
                std::fs::create_dir_all(dir).map_err(|err| {
                    format!("failed to create log directory `{}`: {err}", dir.display())
                })?;
                builder
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
                    .write_mode(WriteMode::BufferAndFlush)
                    .append()
                    // detailed_format adds timestamp + source location:
                    // [YYYY-MM-DD HH:MM:SS.ffffff TZ] LEVEL [module] file:line: message
                    .format_for_files(flexi_logger::detailed_format)
                    .start()
            }
        }
        .map_err(|err| format!("failed to start logger: {err}"))?;

        info!(
            "event=app_start module=core status=ok platform={} version={}",
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION")
        );
        info!("event=logging_init module=logging status=ok level={init_level} sink={init_sink}");

        Ok(LoggingState {
            level: init_level,
            sink: init_sink,
            _logger: logger,
        })
    })?;

    check_active_state(state, normalized_level, &normalized_sink)
}

/// Returns active logging status metadata.
///
/// Returns `None` when logging has not been initialized.
/// Returns `(level, sink)` when logging is active.
pub fn logging_status() -> Option<(&'static str, LogSink)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.sink.clone()))
}

/// Returns the default log level for the current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn check_active_state(
    state: &LoggingState,
    level: &'static str,
    sink: &LogSink,
) -> Result<(), String> {
    if state.sink != *sink {
        return Err(format!(
            "logging already initialized with sink `{}`; refusing to switch to `{sink}`",
            state.sink
        ));
    }
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{level}`",
            state.level
        ));
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_sink(sink: LogSink) -> Result<LogSink, String> {
    match sink {
        LogSink::Stderr => Ok(LogSink::Stderr),
        LogSink::File(dir) => {
            if dir.as_os_str().is_empty() {
                return Err("log directory cannot be empty".to_string());
            }
            if !dir.is_absolute() {
                return Err(format!(
                    "log directory must be an absolute path, got `{}`",
                    dir.display()
                ));
            }
            Ok(LogSink::File(dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, normalize_level, normalize_sink, LogSink};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "opsdesk-logging-{suffix}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(
            normalize_level("INFO").expect("INFO should normalize"),
            "info"
        );
        assert_eq!(
            normalize_level(" warning ").expect("warning should normalize"),
            "warn"
        );
    }

    #[test]
    fn normalize_level_rejects_unknown_values() {
        let error = normalize_level("loud").expect_err("unknown level must be rejected");
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn normalize_sink_rejects_relative_directory() {
        let error = normalize_sink(LogSink::File(PathBuf::from("logs/dev")))
            .expect_err("relative directories must be rejected");
        assert!(error.contains("absolute"));
    }

    #[test]
    fn normalize_sink_passes_stderr_through() {
        let sink = normalize_sink(LogSink::Stderr).expect("stderr needs no checks");
        assert_eq!(sink, LogSink::Stderr);
    }

    #[test]
    fn init_logging_is_idempotent_for_same_config_and_rejects_conflicts() {
        let log_dir = unique_temp_dir("idempotent");
        let sink = LogSink::File(log_dir.clone());

        init_logging("info", sink.clone()).expect("first init should succeed");
        init_logging("info", sink.clone()).expect("same config should be idempotent");

        let level_error =
            init_logging("debug", sink.clone()).expect_err("level conflict should fail");
        assert!(level_error.contains("refusing to switch"));

        let sink_error =
            init_logging("info", LogSink::Stderr).expect_err("sink conflict should fail");
        assert!(sink_error.contains("refusing to switch"));

        let (active_level, active_sink) = logging_status().expect("logging should be active");
        assert_eq!(active_level, "info");
        assert_eq!(active_sink, sink);
    }
}
