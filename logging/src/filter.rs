// Level filtering by logger/target prefix.

use std::collections::HashMap;
use tracing::Level;
use tracing_core::metadata::LevelFilter;

/// Per-prefix level rules with a root default.
///
/// The key is a prefix matched against the event's logger name (e.g. `app-main`)
/// or target (e.g. `sqlx::query`). The longest matching prefix decides; events
/// matching no rule use the root level.
#[derive(Debug, Clone)]
pub struct TargetFilter {
  rules: HashMap<String, LevelFilter>,
  root: LevelFilter,
}

impl TargetFilter {
  pub fn new(root: LevelFilter) -> Self {
    Self {
      rules: HashMap::new(),
      root,
    }
  }

  pub fn with_rule(mut self, prefix: impl Into<String>, level: LevelFilter) -> Self {
    self.rules.insert(prefix.into(), level);
    self
  }

  /// The level used for events matching no rule.
  pub fn root(&self) -> LevelFilter {
    self.root
  }

  /// The most verbose level any rule or the root allows.
  pub fn max_level(&self) -> LevelFilter {
    self
      .rules
      .values()
      .copied()
      .fold(self.root, std::cmp::max)
  }

  /// Finds the most specific matching rule for the given name.
  fn find_most_specific_rule(&self, name: &str) -> Option<(&str, LevelFilter)> {
    self
      .rules
      .iter()
      .filter(|(prefix, _)| name.starts_with(prefix.as_str()))
      .max_by_key(|(prefix, _)| prefix.len())
      .map(|(prefix, level)| (prefix.as_str(), *level))
  }

  /// Checks whether an event should be written. A rule matching the logger name
  /// takes precedence over one matching the target.
  pub fn enabled(&self, logger: &str, target: &str, level: &Level) -> bool {
    let threshold = self
      .find_most_specific_rule(logger)
      .or_else(|| self.find_most_specific_rule(target))
      .map(|(_, level)| level)
      .unwrap_or(self.root);
    *level <= threshold
  }
}
