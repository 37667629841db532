//! Logging setup
//!
//! - `RUST_LOG`: filter directives (default `eshop=info`)
//! - `ESHOP_LOG_FORMAT`: `json` for structured output, anything else is pretty
//! - `ESHOP_LOG_DIR`: when set, also write a daily-rolling `eshop.log` there

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "eshop=info";
const LOG_FILE_PREFIX: &str = "eshop.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file sink; keep it alive until exit.
pub fn init_logging() -> Result<Option<WorkerGuard>> {
    let log_format = std::env::var("ESHOP_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let log_dir = std::env::var("ESHOP_LOG_DIR").ok();

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    let (file_writer, guard) = match log_dir {
        Some(dir) => {
            let dir = shellexpand::tilde(&dir).into_owned();
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            let file_layer = file_writer.map(|w| fmt::layer().json().with_writer(w));
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .with(file_layer)
                .try_init()
                .context("Failed to install tracing subscriber")?;
        }
        _ => {
            // Development: Pretty formatting with colors
            let file_layer = file_writer.map(|w| fmt::layer().with_ansi(false).with_writer(w));
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .with(file_layer)
                .try_init()
                .context("Failed to install tracing subscriber")?;
        }
    }

    Ok(guard)
}
