//! Tracing subscriber setup.
//!
//! The level is taken from `RUST_LOG` (default `info`). Logs go to stderr so
//! `render` and `inspect` output on stdout stays clean.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::LogFormat;
use crate::error::CliError;

pub fn init_logging(format: LogFormat) -> Result<(), CliError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|error| CliError::Logging(error.to_string()))
}
