//! Logging configuration using tracing
//!
//! Level is controlled by the `PWCHECK_LOG` environment variable, e.g.
//! `PWCHECK_LOG=debug pwcheck-rpc`. Password values are never logged.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "PWCHECK_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("pwcheck=info,pwcheck_rpc=info,warn"))
}

/// Logs to stderr. Used by the headless host, whose stdout carries the protocol.
pub fn init_stderr() {
    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .try_init();
}

/// Logs to a daily-rolling file under `dir`. Keep the guard alive for the
/// lifetime of the process or buffered lines are lost.
pub fn init_file(dir: &Path) -> io::Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::daily(dir, "pwcheck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init();

    tracing::info!("pwcheck starting, log directory: {}", dir.display());
    Ok(guard)
}
