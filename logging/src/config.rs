// Logging configuration, loaded from YAML.

use crate::encoders::PatternFormatter;
use crate::error::{Error, Result};
use crate::filter::TargetFilter;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_core::metadata::LevelFilter;

const DEFAULT_CONFIG_BASE_NAME: &str = "scaffold_logging";
const DEFAULT_CONFIG_EXTENSION: &str = "yaml";

/// Default line layout: local `HH:MM:SS`, logger name, level, message.
pub const DEFAULT_PATTERN: &str = "%d{local:%H:%M:%S} %c %p %m";

fn default_level() -> String {
  "debug".to_string()
}

fn default_pattern() -> String {
  DEFAULT_PATTERN.to_string()
}

fn default_color() -> bool {
  true
}

/// The logging configuration.
///
/// ```yaml
/// level: debug
/// pattern: "%d{local:%H:%M:%S} %c %p %m"
/// color: true
/// targets:
///   sqlx: warn
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
  /// Root level for events matching no target rule.
  #[serde(default = "default_level")]
  pub level: String,
  #[serde(default = "default_pattern")]
  pub pattern: String,
  /// Whether to highlight the line header with ANSI colors.
  #[serde(default = "default_color")]
  pub color: bool,
  /// Level overrides keyed by logger name or target prefix.
  #[serde(default)]
  pub targets: HashMap<String, String>,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self {
      level: default_level(),
      pattern: default_pattern(),
      color: default_color(),
      targets: HashMap::new(),
    }
  }
}

impl LoggingConfig {
  pub fn from_yaml_str(yaml: &str) -> Result<Self> {
    serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  pub fn from_file(path: &Path) -> Result<Self> {
    let contents = fs::read_to_string(path)?;
    Self::from_yaml_str(&contents)
  }

  pub fn with_level(mut self, level: impl Into<String>) -> Self {
    self.level = level.into();
    self
  }

  pub fn with_target(mut self, prefix: impl Into<String>, level: impl Into<String>) -> Self {
    self.targets.insert(prefix.into(), level.into());
    self
  }

  /// Builds the level filter, validating every level name.
  pub fn filter(&self) -> Result<TargetFilter> {
    let root = parse_level("level", &self.level)?;
    self
      .targets
      .iter()
      .try_fold(TargetFilter::new(root), |filter, (prefix, level)| {
        let level = parse_level(&format!("targets.{}", prefix), level)?;
        Ok(filter.with_rule(prefix.clone(), level))
      })
  }

  pub fn formatter(&self) -> PatternFormatter {
    PatternFormatter::new(&self.pattern).with_color(self.color)
  }
}

/// Parses a level name. Accepts the `tracing` names and `warning`, in any case.
pub fn parse_level(field: &str, value: &str) -> Result<LevelFilter> {
  match value.trim().to_ascii_lowercase().as_str() {
    "off" => Ok(LevelFilter::OFF),
    "error" | "critical" => Ok(LevelFilter::ERROR),
    "warn" | "warning" => Ok(LevelFilter::WARN),
    "info" => Ok(LevelFilter::INFO),
    "debug" => Ok(LevelFilter::DEBUG),
    "trace" => Ok(LevelFilter::TRACE),
    other => Err(Error::InvalidConfigValue {
      field: field.to_string(),
      message: format!("unknown level '{}'", other),
    }),
  }
}

/// Finds the configuration file in the working directory.
///
/// Checks `scaffold_logging.<env>.yaml` first when an environment is known (from the
/// argument, `SCAFFOLD_ENV` or `APP_ENV`), then `scaffold_logging.yaml`.
pub fn find_config_file(environment_suffix: Option<&str>) -> Result<PathBuf> {
  find_config_file_in(Path::new("."), environment_suffix)
}

pub(crate) fn find_config_file_in(dir: &Path, environment_suffix: Option<&str>) -> Result<PathBuf> {
  let env_name = environment_suffix
    .map(str::to_string)
    .or_else(|| env::var("SCAFFOLD_ENV").ok())
    .or_else(|| env::var("APP_ENV").ok())
    .filter(|name| !name.is_empty());

  let mut files_to_check = Vec::with_capacity(2);
  if let Some(env_name) = &env_name {
    files_to_check.push(format!(
      "{}.{}.{}",
      DEFAULT_CONFIG_BASE_NAME, env_name, DEFAULT_CONFIG_EXTENSION
    ));
  }
  files_to_check.push(format!("{}.{}", DEFAULT_CONFIG_BASE_NAME, DEFAULT_CONFIG_EXTENSION));

  files_to_check
    .iter()
    .map(|name| dir.join(name))
    .find(|path| path.is_file())
    .ok_or_else(|| {
      Error::ConfigNotFound(format!(
        "Searched for: {:?} in {:?}. Provide a config file or set SCAFFOLD_ENV/APP_ENV.",
        files_to_check, dir
      ))
    })
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn empty_yaml_uses_defaults() {
    let config = LoggingConfig::from_yaml_str("{}").unwrap();
    assert_eq!(config, LoggingConfig::default());
    assert_eq!(config.pattern, DEFAULT_PATTERN);
  }

  #[test]
  fn parses_full_config() {
    let yaml = r#"
level: INFO
pattern: "%p %m"
color: false
targets:
  sqlx: WARNING
  app-worker: trace
"#;
    let config = LoggingConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.level, "INFO");
    assert!(!config.color);

    let filter = config.filter().unwrap();
    assert_eq!(filter.root(), LevelFilter::INFO);
    assert!(!filter.enabled("sqlx::query", "sqlx::query", &tracing::Level::INFO));
    assert!(filter.enabled("app-worker", "scaffold_logging", &tracing::Level::TRACE));
  }

  #[test]
  fn unknown_fields_are_rejected() {
    let err = LoggingConfig::from_yaml_str("colour: true").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
  }

  #[test]
  fn invalid_level_names_the_field() {
    let config = LoggingConfig::default().with_target("sqlx", "loud");
    match config.filter() {
      Err(Error::InvalidConfigValue { field, .. }) => assert_eq!(field, "targets.sqlx"),
      other => panic!("expected an invalid level, got {:?}", other.map(|_| ())),
    }
  }

  #[test]
  fn finds_environment_specific_file_first() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scaffold_logging.yaml"), "{}").unwrap();
    fs::write(dir.path().join("scaffold_logging.testing.yaml"), "{}").unwrap();

    let found = find_config_file_in(dir.path(), Some("testing")).unwrap();
    assert_eq!(found, dir.path().join("scaffold_logging.testing.yaml"));

    let fallback = find_config_file_in(dir.path(), Some("staging")).unwrap();
    assert_eq!(fallback, dir.path().join("scaffold_logging.yaml"));
  }

  #[test]
  fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = find_config_file_in(dir.path(), Some("testing")).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
  }

  #[test]
  fn from_file_reads_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scaffold_logging.yaml");
    fs::write(&path, "level: warn\n").unwrap();
    let config = LoggingConfig::from_file(&path).unwrap();
    assert_eq!(config.level, "warn");
  }
}
