//! Logging setup for the `domseek` binary.
//!
//! Events go to a daily rolling file named after the app, as plain text or
//! JSON lines, and can be mirrored to stderr. The filter comes from
//! `RUST_LOG` when set, otherwise from the configured level.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

const LOG_DIR_ENV: &str = "DOMSEEK_LOG_DIR";

/// Line encoding for both the file and stderr sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Settings for [`init_logging`], usually mapped from the `logging`
/// section of `domseek.yaml`.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Prefix of the log file and last component of the default directory.
    pub app_name: &'static str,
    /// Where log files go. Unset means `$DOMSEEK_LOG_DIR`, then
    /// `~/.local/share/<app_name>`. A leading `~/` is expanded.
    pub log_dir: Option<PathBuf>,
    pub emit_stderr: bool,
    pub format: LogFormat,
    /// Filter directive, e.g. `info` or `domseek_search=debug`.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "domseek",
            log_dir: None,
            emit_stderr: false,
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

/// Install the global subscriber and return today's log file path.
///
/// Only the first call configures anything; later calls return the path
/// chosen by the first.
pub fn init_logging(config: LogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let dir = resolve_log_dir(config.app_name, config.log_dir.as_deref());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let file_prefix = format!("{}.log", config.app_name);
    let today = Local::now().format("%Y-%m-%d");
    let log_file = dir.join(format!("{file_prefix}.{today}"));

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, file_prefix));
    let _ = LOG_GUARD.set(guard);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let json = config.format == LogFormat::Json;
    let (file_text, file_json) = if json {
        (None, Some(fmt::layer().json().with_writer(writer)))
    } else {
        (Some(fmt::layer().with_writer(writer).with_ansi(false)), None)
    };
    let stderr_text = (config.emit_stderr && !json).then(|| fmt::layer().with_writer(std::io::stderr));
    let stderr_json =
        (config.emit_stderr && json).then(|| fmt::layer().json().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_text)
        .with(file_json)
        .with(stderr_text)
        .with(stderr_json)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    tracing::debug!(path = %log_file.display(), "logging.initialised");
    let _ = LOG_PATH.set(log_file.clone());
    Ok(log_file)
}

fn resolve_log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return expand_home(dir);
    }

    if let Ok(env_dir) = std::env::var(LOG_DIR_ENV) {
        return expand_home(Path::new(&env_dir));
    }

    default_data_dir(app_name)
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

fn default_data_dir(app_name: &str) -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(app_name)
    } else {
        PathBuf::from(".").join(app_name)
    }
}
