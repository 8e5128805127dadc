//! stacked-i18n binary entrypoint: argument parsing, logging, dispatch.

mod args;

use std::path::Path;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Build the log filter.
///
/// Inputs:
/// - `level`: Level chosen on the command line
///
/// Output:
/// - `RUST_LOG` when it is set and valid, otherwise a filter for `level`
///
/// Details:
/// - An unknown `level` falls back to `warn`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// What: Initialize the tracing subscriber.
///
/// Inputs:
/// - `level`: Log level from the command line
/// - `log_file`: Optional file to append to; stderr otherwise
///
/// Details:
/// - When the log file cannot be opened, logging falls back to stderr and warns.
fn init_logging(level: &str, log_file: Option<&Path>) {
    if let Some(path) = log_file {
        match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
        {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter(level))
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_timer(UtcTime::rfc_3339())
                    .init();
                let _ = LOG_GUARD.set(guard);
                tracing::info!(path = %path.display(), "logging initialized");
                return;
            }
            Err(e) => {
                init_stderr_logging(level);
                tracing::warn!(path = %path.display(), error = %e, "failed to open log file; using stderr");
                return;
            }
        }
    }
    init_stderr_logging(level);
}

/// Stderr logger, so stdout carries only command output.
fn init_stderr_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .init();
}

fn main() -> ExitCode {
    let args = args::Args::parse();
    let log_level = args::determine_log_level(&args);
    init_logging(&log_level, args.log_file.as_deref());

    tracing::debug!(command = ?args.command, "stacked-i18n starting");
    match args::process_args(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("stacked-i18n: {err}");
            ExitCode::FAILURE
        }
    }
}
