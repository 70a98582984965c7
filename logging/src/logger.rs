// A named logging handle.

use std::fmt::Display;
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// A named logger, the handle services hold instead of calling `tracing` macros
/// with ad-hoc targets.
///
/// Every event is tagged with `logger = <name>`, which the pattern layer shows
/// through `%c` and matches against its filter rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
  name: String,
  level: LevelFilter,
}

impl Logger {
  /// Creates a logger that emits events at `DEBUG` and above.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      level: LevelFilter::DEBUG,
    }
  }

  /// Sets the least severe level this logger emits.
  pub fn with_level(mut self, level: LevelFilter) -> Self {
    self.level = level;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn level(&self) -> LevelFilter {
    self.level
  }

  pub fn is_enabled(&self, level: Level) -> bool {
    level <= self.level
  }

  pub fn debug(&self, message: impl Display) {
    if self.is_enabled(Level::DEBUG) {
      tracing::debug!(logger = %self.name, "{}", message);
    }
  }

  pub fn info(&self, message: impl Display) {
    if self.is_enabled(Level::INFO) {
      tracing::info!(logger = %self.name, "{}", message);
    }
  }

  pub fn warn(&self, message: impl Display) {
    if self.is_enabled(Level::WARN) {
      tracing::warn!(logger = %self.name, "{}", message);
    }
  }

  pub fn error(&self, message: impl Display) {
    if self.is_enabled(Level::ERROR) {
      tracing::error!(logger = %self.name, "{}", message);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn level_threshold_follows_tracing_ordering() {
    let logger = Logger::new("app-main").with_level(LevelFilter::WARN);
    assert!(logger.is_enabled(Level::ERROR));
    assert!(logger.is_enabled(Level::WARN));
    assert!(!logger.is_enabled(Level::INFO));
    assert_eq!(logger.name(), "app-main");
    assert!(!Logger::new("silent").with_level(LevelFilter::OFF).is_enabled(Level::ERROR));
  }
}
