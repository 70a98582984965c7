// src/utility.rs

use crate::database::DbHandle;
use crate::error::{Error, Result};
use scaffold_logging::Logger;
use std::fmt;
use std::sync::Arc;

/// Example service demonstrating a request-scoped service with injected
/// dependencies: a per-request database handle and the shared application logger.
pub struct UtilityService {
  db: DbHandle,
  logger: Arc<Logger>,
}

impl UtilityService {
  pub fn new(db: DbHandle, logger: Arc<Logger>) -> Self {
    Self { db, logger }
  }

  pub fn logger(&self) -> &Arc<Logger> {
    &self.logger
  }

  /// Asks the database server for its version. Returns `"Unknown"` when the
  /// server answers without a value.
  pub fn database_version(&self) -> Result<String> {
    match self.db.server_version() {
      Ok(Some(version)) => {
        self
          .logger
          .info(format_args!("Database version retrieved: {}", version));
        Ok(version)
      }
      Ok(None) => Ok("Unknown".to_string()),
      Err(e) => {
        self
          .logger
          .error(format_args!("Error retrieving database version: {}", e));
        Err(Error::Database(e))
      }
    }
  }
}

impl fmt::Debug for UtilityService {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("UtilityService")
      .field("logger", &self.logger.name())
      .finish_non_exhaustive()
  }
}
