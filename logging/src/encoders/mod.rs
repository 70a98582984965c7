// Strategies for formatting LogEvents into byte streams.

use crate::model::LogEvent;

pub mod pattern;
pub mod util;

pub use pattern::PatternFormatter;

/// Trait for types that can format a `LogEvent` into a byte vector.
pub trait EventFormatter: Send + Sync + 'static {
  /// Formats the given `LogEvent` into a `Vec<u8>`.
  /// The output should include a trailing newline.
  fn format_event(&self, event: &LogEvent) -> Vec<u8>;
}
