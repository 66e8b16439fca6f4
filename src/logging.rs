use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use anyhow::{Context, Result, anyhow};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{self, RollingFileAppender},
};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use uuid::Uuid;

use crate::config::{Config, LoggingRotation};

const LOG_FILE_PREFIX: &str = "console.log";
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Keeps the non-blocking file writer alive. Dropping it flushes pending
/// records, so `main` holds it until the command finishes.
pub struct LoggingGuard {
    _worker_guard: WorkerGuard,
    run_id: String,
}

impl LoggingGuard {
    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

/// Installs the file and stderr layers for one console run. The opening
/// event records which config file and API this run talks to.
pub fn init_tracing(config: &Config, config_path: &Path) -> Result<LoggingGuard> {
    let logging_config = &config.logging;
    let filter = logging_config.filter.trim();
    if filter.is_empty() {
        return Err(anyhow!("logging.filter cannot be empty"));
    }
    if logging_config.dir.as_os_str().is_empty() {
        return Err(anyhow!("logging.dir cannot be empty"));
    }

    let log_dir = absolute_log_dir(&logging_config.dir)?;
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create logging directory {}", log_dir.display()))?;

    let cutoff = retention_cutoff(SystemTime::now(), logging_config.retention_days);
    let purge_report = purge_expired_logs(&log_dir, LOG_FILE_PREFIX, cutoff);

    let (file_writer, worker_guard) =
        tracing_appender::non_blocking(rolling_appender(&log_dir, &logging_config.rotation));

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(true)
        .with_ansi(false)
        .with_writer(file_writer)
        .with_filter(parse_filter(filter)?);

    let stderr_layer = logging_config.stderr_warn_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_filter(LevelFilter::WARN)
    });

    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("failed to initialize tracing subscriber")?;

    let run_id = Uuid::now_v7().to_string();
    tracing::info!(
        target: "logging",
        run_id = %run_id,
        config_path = %config_path.display(),
        api_base_url = %config.api.base_url,
        request_timeout_ms = config.api.request_timeout_ms,
        log_dir = %log_dir.display(),
        purged_logs = purge_report.removed,
        "console_logging_initialized"
    );
    for problem in &purge_report.problems {
        tracing::warn!(target: "logging", problem = %problem, "log_retention_problem");
    }

    Ok(LoggingGuard {
        _worker_guard: worker_guard,
        run_id,
    })
}

fn parse_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter).with_context(|| format!("failed to parse logging.filter '{filter}'"))
}

fn rolling_appender(log_dir: &Path, rotation: &LoggingRotation) -> RollingFileAppender {
    match rotation {
        LoggingRotation::Daily => rolling::daily(log_dir, LOG_FILE_PREFIX),
        LoggingRotation::Hourly => rolling::hourly(log_dir, LOG_FILE_PREFIX),
    }
}

fn absolute_log_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().context("failed to resolve relative logging.dir")?;
    Ok(cwd.join(dir))
}

fn retention_cutoff(now: SystemTime, retention_days: usize) -> SystemTime {
    let window = Duration::from_secs((retention_days as u64).saturating_mul(SECONDS_PER_DAY));
    now.checked_sub(window)
        .map_or(SystemTime::UNIX_EPOCH, |cutoff| cutoff.max(SystemTime::UNIX_EPOCH))
}

#[derive(Debug, Default)]
struct PurgeReport {
    removed: usize,
    problems: Vec<String>,
}

/// Removes files starting with `prefix` last modified at or before
/// `cutoff`. Problems are collected rather than returned so logging setup
/// never fails because of an unreadable old file.
fn purge_expired_logs(log_dir: &Path, prefix: &str, cutoff: SystemTime) -> PurgeReport {
    let mut report = PurgeReport::default();

    let entries = match fs::read_dir(log_dir) {
        Ok(entries) => entries,
        Err(err) => {
            report
                .problems
                .push(format!("failed to scan {}: {err}", log_dir.display()));
            return report;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                report.problems.push(format!("failed to read entry: {err}"));
                continue;
            }
        };
        if !entry.file_name().to_string_lossy().starts_with(prefix) {
            continue;
        }

        let path = entry.path();
        let modified = entry
            .metadata()
            .and_then(|metadata| {
                if metadata.is_file() {
                    metadata.modified().map(Some)
                } else {
                    Ok(None)
                }
            });
        match modified {
            Ok(Some(modified)) if modified <= cutoff => match fs::remove_file(&path) {
                Ok(()) => report.removed += 1,
                Err(err) => report
                    .problems
                    .push(format!("failed to remove {}: {err}", path.display())),
            },
            Ok(_) => {}
            Err(err) => report
                .problems
                .push(format!("failed to stat {}: {err}", path.display())),
        }
    }

    report
}
