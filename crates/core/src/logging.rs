//! Logging infrastructure for the Agent CLI.
//!
//! All logs are emitted to stderr: stdout carries command results (and, in
//! verbose mode, the companion's own output).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::error::{AppError, AppResult};

/// Initialize the tracing subscriber with stderr output.
///
/// # Arguments
/// * `log_level` - Optional filter override (e.g., "debug", "agent_bridge=trace")
/// * `format` - Human-readable or JSON lines
/// * `no_color` - Disable ANSI colors (ignored for JSON)
///
/// # Example
/// ```no_run
/// use agent_core::{logging::init_logging, LogFormat};
///
/// init_logging(None, LogFormat::Pretty, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, format: LogFormat, no_color: bool) -> AppResult<()> {
    let env_filter = build_filter(log_level)?;

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(!no_color && supports_color()),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(true),
            )
            .try_init(),
    };

    result.map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))
}

/// Filter used when neither a level nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: &str = "info";

fn build_filter(log_level: Option<&str>) -> AppResult<EnvFilter> {
    let filter_str = filter_directives(log_level, std::env::var("RUST_LOG").ok());

    EnvFilter::try_new(&filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter '{}': {}", filter_str, e)))
}

/// Explicit level first, then `RUST_LOG`, then [`DEFAULT_LOG_LEVEL`].
fn filter_directives(log_level: Option<&str>, rust_log: Option<String>) -> String {
    match log_level {
        Some(level) => level.to_string(),
        None => rust_log.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    }
}

fn supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}
