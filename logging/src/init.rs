// The public initialization functions for scaffold_logging.

use crate::{
  config::LoggingConfig,
  error::{Error, Result},
  subscriber::PatternLayer,
};
use std::io;
use std::path::Path;
use tracing::Level;
use tracing_core::metadata::LevelFilter;
use tracing_subscriber::prelude::*;

/// Builds the layer described by `config`, writing to stderr.
///
/// Use this to compose the layer into a custom subscriber; [`init`] installs it
/// globally.
pub fn stderr_layer(config: &LoggingConfig) -> Result<PatternLayer<fn() -> io::Stderr>> {
  Ok(PatternLayer::new(
    config.filter()?,
    config.formatter(),
    io::stderr as fn() -> io::Stderr,
  ))
}

/// Installs the `log` to `tracing` bridge and the global subscriber.
///
/// Can only succeed once per process. The bridge goes in first, so a failure
/// never leaves a global subscriber installed without it.
pub fn init(config: &LoggingConfig) -> Result<()> {
  if tracing::dispatcher::has_been_set() {
    return Err(Error::GlobalSubscriberSet(
      "a global default trace dispatcher has already been set".to_string(),
    ));
  }

  let layer = stderr_layer(config)?;
  let filter = config.filter()?;
  tracing_log::LogTracer::init_with_filter(as_log_filter(filter.max_level()))
    .map_err(|e| Error::LogBridgeInit(e.to_string()))?;

  tracing::subscriber::set_global_default(tracing_subscriber::registry().with(layer))
    .map_err(|e| Error::GlobalSubscriberSet(e.to_string()))?;

  tracing::debug!(level = %config.level, pattern = %config.pattern, "logging initialized");
  Ok(())
}

// `log` records above the most verbose configured level are dropped before bridging.
fn as_log_filter(level: LevelFilter) -> log::LevelFilter {
  match level.into_level() {
    None => log::LevelFilter::Off,
    Some(level) if level == Level::ERROR => log::LevelFilter::Error,
    Some(level) if level == Level::WARN => log::LevelFilter::Warn,
    Some(level) if level == Level::INFO => log::LevelFilter::Info,
    Some(level) if level == Level::DEBUG => log::LevelFilter::Debug,
    Some(_) => log::LevelFilter::Trace,
  }
}

/// Initializes `scaffold_logging` from a YAML configuration file.
pub fn init_from_file(config_path: &Path) -> Result<()> {
  let config = LoggingConfig::from_file(config_path)?;
  init(&config)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn log_filter_matches_tracing_levels() {
    assert_eq!(as_log_filter(LevelFilter::OFF), log::LevelFilter::Off);
    assert_eq!(as_log_filter(LevelFilter::WARN), log::LevelFilter::Warn);
    assert_eq!(as_log_filter(LevelFilter::TRACE), log::LevelFilter::Trace);
  }

  #[test]
  fn stderr_layer_rejects_bad_levels() {
    let config = LoggingConfig::default().with_level("loud");
    assert!(matches!(
      stderr_layer(&config),
      Err(Error::InvalidConfigValue { .. })
    ));
  }
}
