// Application settings read from the environment.

use crate::error::{Error, Result};
use scaffold_logging::config::parse_level;
use scaffold_logging::LoggingConfig;
use serde::Deserialize;
use std::env;
use tracing::level_filters::LevelFilter;

/// The environment name tests must run under.
pub const TESTING_ENV: &str = "testing";

fn default_exec_env() -> String {
  "development".to_string()
}

fn default_project_name() -> String {
  "app".to_string()
}

fn default_log_level() -> String {
  "DEBUG".to_string()
}

fn default_version() -> String {
  "1.0.0".to_string()
}

/// Backend settings.
///
/// Every field maps to an upper-case environment variable of the same name
/// (`EXEC_ENV`, `DATABASE_URL`, ...). Empty variables count as unset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
  #[serde(default = "default_exec_env")]
  pub exec_env: String,
  pub database_url: String,
  #[serde(default)]
  pub echo_sql: bool,
  #[serde(default)]
  pub test: bool,
  #[serde(default = "default_project_name")]
  pub project_name: String,
  #[serde(default = "default_log_level")]
  pub log_level: String,
  #[serde(default = "default_version")]
  pub version: String,
}

impl Settings {
  /// Settings with defaults for everything but the database URL.
  pub fn new(database_url: impl Into<String>) -> Self {
    Self {
      exec_env: default_exec_env(),
      database_url: database_url.into(),
      echo_sql: false,
      test: false,
      project_name: default_project_name(),
      log_level: default_log_level(),
      version: default_version(),
    }
  }

  /// Reads settings from the process environment.
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Reads settings through `lookup`, which maps a variable name to its value.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

    let database_url = get("DATABASE_URL").ok_or(Error::MissingSetting("DATABASE_URL"))?;
    let mut settings = Self::new(database_url);

    if let Some(value) = get("EXEC_ENV") {
      settings.exec_env = value;
    }
    if let Some(value) = get("ECHO_SQL") {
      settings.echo_sql = parse_bool("ECHO_SQL", &value)?;
    }
    if let Some(value) = get("TEST") {
      settings.test = parse_bool("TEST", &value)?;
    }
    if let Some(value) = get("PROJECT_NAME") {
      settings.project_name = value;
    }
    if let Some(value) = get("LOG_LEVEL") {
      settings.log_level = value;
    }
    if let Some(value) = get("VERSION") {
      settings.version = value;
    }
    Ok(settings)
  }

  pub fn from_yaml_str(yaml: &str) -> Result<Self> {
    serde_yaml::from_str(yaml).map_err(|e| Error::SettingsParse(e.to_string()))
  }

  /// Fails unless `exec_env` is `testing`, so a test run can never touch a
  /// development or production database.
  pub fn ensure_testing(&self) -> Result<()> {
    if self.exec_env == TESTING_ENV {
      Ok(())
    } else {
      Err(Error::WrongEnvironment {
        expected: TESTING_ENV,
        actual: self.exec_env.clone(),
      })
    }
  }

  pub fn log_level(&self) -> Result<LevelFilter> {
    Ok(parse_level("log_level", &self.log_level)?)
  }

  /// Logging configuration for the backend: the configured root level, with SQL
  /// chatter lowered to warnings unless `echo_sql` is set.
  pub fn logging_config(&self) -> LoggingConfig {
    let sql_level = if self.echo_sql { "info" } else { "warn" };
    LoggingConfig::default()
      .with_level(self.log_level.clone())
      .with_target("sqlx", sql_level)
  }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool> {
  match value.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "0" | "false" | "no" | "off" => Ok(false),
    _ => Err(Error::InvalidSetting {
      name,
      value: value.to_string(),
    }),
  }
}
