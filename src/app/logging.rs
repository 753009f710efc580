use super::config::LogLevel;
use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitializationError {
    #[error("Logging system initialization failed: {details}")]
    LoggingInitFailed { details: String },
}

static INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Install the global tracing subscriber once.
///
/// `RUST_LOG` overrides `level`; `RUST_LOG_FORMAT=json` switches to JSON
/// lines. Later calls return the outcome of the first one.
pub fn setup_logging(level: LogLevel) -> Result<(), InitializationError> {
    INIT.get_or_init(|| init_subscriber(level).map_err(|e| e.to_string()))
        .clone()
        .map_err(|details| InitializationError::LoggingInitFailed { details })
}

pub fn use_json_format() -> bool {
    std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level.into()).into())
        .from_env_lossy()
}

fn init_subscriber(level: LogLevel) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = build_filter(level);

    if use_json_format() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()?;
    }

    Ok(())
}
