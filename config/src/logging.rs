//! Tracing initialization shared by the MCI binaries. Logs never go to stdout.
//!
//! * **RUST_LOG**: filter directives; wins over the `default_level` argument when set.
//! * **LOG_FILE**: when set, events are appended to this file (plain text, no ANSI) through a
//!   non-blocking writer. When unset, events are dropped so stdout carries only the reply.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const FALLBACK_FILTER: &str = "info";

/// Keeps the file writer flushing. Hold it until the process exits.
#[must_use = "dropping the guard stops the log writer"]
pub struct LogGuard {
    worker: Option<WorkerGuard>,
}

impl LogGuard {
    /// True when events are written to `LOG_FILE`.
    pub fn writes_to_file(&self) -> bool {
        self.worker.is_some()
    }
}

/// Picks the filter: `rust_log` when it parses, else `default_level`, else `info`.
pub fn build_filter(rust_log: Option<&str>, default_level: &str) -> EnvFilter {
    rust_log
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(default_level).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_FILTER))
}

/// Installs the global subscriber. A second call keeps the first subscriber and still succeeds.
///
/// `default_level` is used when `RUST_LOG` is unset; the CLI passes `LOG_LEVEL` from settings.
pub fn init(default_level: &str) -> std::io::Result<LogGuard> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(rust_log.as_deref(), default_level);

    match std::env::var("LOG_FILE") {
        Ok(path) if !path.trim().is_empty() => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            let (writer, worker) = tracing_appender::non_blocking(file);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter);
            if tracing_subscriber::registry().with(file_layer).try_init().is_ok() {
                tracing::info!(path = %path, "mci logging to file");
            }
            Ok(LogGuard {
                worker: Some(worker),
            })
        }
        _ => {
            let sink_layer = tracing_subscriber::fmt::layer()
                .with_writer(std::io::sink)
                .with_filter(filter);
            let _ = tracing_subscriber::registry().with(sink_layer).try_init();
            Ok(LogGuard { worker: None })
        }
    }
}
