use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Install the global tracing subscriber. Call once at startup.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_logging(format: LogFormat) -> Result<(), TryInitError> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let registry = tracing_subscriber::registry().with(filter);

  match format {
    LogFormat::Json => registry
      .with(
        fmt::layer()
          .with_target(true)
          .with_line_number(true)
          .json(),
      )
      .try_init()?,
    LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init()?,
  }

  tracing::debug!(?format, "Logging initialized");
  Ok(())
}
