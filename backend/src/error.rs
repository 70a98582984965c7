use scaffold_ioc::BoxError;
use thiserror::Error;

/// Errors raised while configuring or running the backend services.
#[derive(Debug, Error)]
pub enum Error {
  #[error("Missing required setting '{0}'")]
  MissingSetting(&'static str),

  #[error("Invalid value '{value}' for setting '{name}'")]
  InvalidSetting { name: &'static str, value: String },

  #[error("Failed to parse settings: {0}")]
  SettingsParse(String),

  #[error("Tests aborted! EXEC_ENV={actual} (expected '{expected}')")]
  WrongEnvironment { expected: &'static str, actual: String },

  #[error(transparent)]
  Container(#[from] scaffold_ioc::Error),

  #[error(transparent)]
  Logging(#[from] scaffold_logging::Error),

  #[error("Database error: {0}")]
  Database(#[source] BoxError),
}

/// A specialized `Result` type for backend operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
